use std::path::PathBuf;

const BANNER: &str = "banner.jpg";
const CONFIRMATION: &str = "confirmation.jpg";

/// Optional pictures shipped next to the bot. Missing files are not an
/// error; the text is sent on its own instead.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    dir: Option<PathBuf>,
}

impl Assets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Some(dir.into()) }
    }

    /// No pictures at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn banner(&self) -> Option<PathBuf> {
        self.lookup(BANNER)
    }

    pub fn confirmation(&self) -> Option<PathBuf> {
        self.lookup(CONFIRMATION)
    }

    pub fn image(&self, file_name: &str) -> Option<PathBuf> {
        self.lookup(file_name)
    }

    fn lookup(&self, file_name: &str) -> Option<PathBuf> {
        self.dir
            .as_deref()
            .map(|dir| dir.join(file_name))
            .filter(|path| path.is_file())
    }
}
