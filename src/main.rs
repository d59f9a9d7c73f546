#[tokio::main]
async fn main() {
    if let Err(err) = guestbook::run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
