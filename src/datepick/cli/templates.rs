pub const CALENDAR_TEMPLATE: &str = include_str!("templates/calendar.jinja");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.jinja");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.jinja");
