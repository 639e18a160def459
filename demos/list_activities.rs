use futures::TryStreamExt;
use pipedrive::{ApiToken, Pipedrive, PipedriveResult};

#[tokio::main]
async fn main() -> PipedriveResult<()> {
    let args = std::env::args().collect::<Vec<_>>();
    let limit = args.get(1).and_then(|l| l.parse::<u32>().ok());

    let pipedrive = Pipedrive::new(ApiToken::from_env()?)?;
    let activities = pipedrive.activities();

    let summary = activities.summary().await?.into_body().into_data();
    println!("{} activities", summary.total_count);

    activities
        .list_all(limit)
        .try_for_each(|activity| {
            println!("{}", activity);
            futures::future::ok(())
        })
        .await?;

    Ok(())
}
