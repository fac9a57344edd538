#[tokio::main]
async fn main() {
    if let Err(e) = luna_lib::run().await {
        eprintln!("luna: {}", e);
        std::process::exit(1);
    }
}
