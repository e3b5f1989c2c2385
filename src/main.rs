use sqs_list_filled_queues::app;

#[tokio::main]
async fn main() {
    let status = app::startup::startup().await;
    std::process::exit(status);
}
