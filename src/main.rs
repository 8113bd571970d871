use verity::error::ServiceError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ServiceError> {
    verity::app::run().await
}
