#[tokio::main]
async fn main() {
    newsdesk::start_server().await;
}
