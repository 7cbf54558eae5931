use teloxide::{prelude::*, utils::command::BotCommands};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(
    rename_rule = "lowercase",
    description = "Post a tweet link and I'll reply with every image in its album."
)]
pub enum Command {
    /// Display this text.
    #[command(aliases = ["h", "?"])]
    Help,
}

/// Handle a command from the user.
///
/// # Errors
///
/// Returns a Teloxide error if the message fails to send.
pub async fn answer(bot: &Bot, msg: &Message, cmd: Command) -> ResponseResult<()> {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?
        }
    };

    Ok(())
}
