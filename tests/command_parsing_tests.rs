use massage_booking_bot::bot::commands::Command;
use teloxide::utils::command::BotCommands;

#[cfg(test)]
mod command_parsing_tests {
    use super::*;

    #[test]
    fn test_simple_commands_parse() {
        let cases = [
            ("/help", Command::Help),
            ("/start", Command::Start),
            ("/menu", Command::Menu),
            ("/info", Command::Info),
            ("/my", Command::My),
        ];
        for (input, expected) in cases {
            assert_eq!(Command::parse(input, "massagebot").unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_command_addressed_to_bot() {
        let result = Command::parse("/start@massagebot", "massagebot");
        assert_eq!(result.unwrap(), Command::Start);
    }

    #[test]
    fn test_unknown_commands_fall_through() {
        assert!(Command::parse("/mybookings", "massagebot").is_err());
        assert!(Command::parse("/book", "massagebot").is_err());
        assert!(Command::parse("hello", "massagebot").is_err());
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = Command::descriptions().to_string();
        for command in ["/help", "/start", "/menu", "/info", "/my"] {
            assert!(help.contains(command), "missing {command}");
        }
    }
}
