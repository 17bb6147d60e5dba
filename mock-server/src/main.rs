use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let practicum_token =
        std::env::var("PRACTICUM_TOKEN").unwrap_or_else(|_| "practicum-token".to_string());
    let telegram_token =
        std::env::var("TELEGRAM_TOKEN").unwrap_or_else(|_| "telegram-token".to_string());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr}");
    println!("  statuses: http://{addr}{}", mock_server::STATUSES_PATH);
    println!("  telegram: http://{addr}");
    mock_server::run(listener, mock_server::new_db(&practicum_token, &telegram_token)).await
}
