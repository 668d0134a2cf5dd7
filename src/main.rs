use aws_prefix_summary::run_region_summary;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let region = std::env::args().nth(1).unwrap_or_default();
    let consolidated = run_region_summary(&region, None).await?;

    log::info!(
        "#End main() {} consolidated blocks for {region}",
        consolidated.len()
    );
    Ok(())
}
