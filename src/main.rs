use verve_dedup::{logging, server};

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    logging::init();

    // ignition fails if the unique request log cannot be opened, and launch
    // fails if the listener cannot bind; either way the process exits here
    let _rocket = server::build().launch().await?;

    Ok(())
}
