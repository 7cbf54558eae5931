use dotenv::dotenv;
use std::sync::Arc;
use teloxide::{
    Bot, prelude::Requester, respond, types::Message, utils::command::BotCommands,
};
use tracing::info;
use tweet_relay::{
    commands::{Command, answer},
    config::Config,
    relay::{ChatFilter, Relay},
    telegram::{TelegramSender, incoming},
    telemetry::setup_logger,
    twitter::TwitterClient,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenv().ok();
    color_eyre::install()?;
    setup_logger()?;

    let config = Config::from_env()?;
    info!(?config, "configuration loaded");

    let bot = Bot::new(config.telegram_token);
    let me = bot.get_me().await?;
    let username = me.username().to_owned();
    info!(bot = %username, "bot starting");

    let relay = Arc::new(Relay::new(
        TwitterClient::new(config.twitter),
        TelegramSender::new(bot.clone()),
        ChatFilter::new(config.chat),
    ));

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let relay = Arc::clone(&relay);
        let username = username.clone();
        async move {
            if let Some(cmd) = msg
                .text()
                .and_then(|text| Command::parse(text, &username).ok())
            {
                return answer(&bot, &msg, cmd).await;
            }
            if let Some(incoming) = incoming(&msg) {
                relay.handle(&incoming).await;
            }
            respond(())
        }
    })
    .await;

    Ok(())
}
