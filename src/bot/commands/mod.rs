use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Massage booking bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start a new booking")]
    Start,
    #[command(description = "Back to the list of massages")]
    Menu,
    #[command(description = "How booking works")]
    Info,
    #[command(description = "My bookings")]
    My,
}
