use pipedrive::{ApiToken, EventAction, EventObject, Pipedrive, PipedriveResult, WebhooksCreateOptions};

#[tokio::main]
async fn main() -> PipedriveResult<()> {
    let args = std::env::args().collect::<Vec<_>>();
    let subscription_url = args[1].as_str();

    let pipedrive = Pipedrive::new(ApiToken::from_env()?)?;
    let webhooks = pipedrive.webhooks();

    let opts = WebhooksCreateOptions::new(subscription_url, EventAction::All, EventObject::Activity);
    let webhook = webhooks.create(&opts).await?.into_body().into_data();
    println!("webhook {} created for {}", webhook.id, webhook.subscription_url);

    for webhook in webhooks.list().await?.into_body().into_data() {
        println!(
            "{} {:?}.{:?} -> {}",
            webhook.id, webhook.event_object, webhook.event_action, webhook.subscription_url
        );
    }

    Ok(())
}
