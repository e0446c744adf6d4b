use std::io;

use smslink::{
    BlacklistAdd, BlacklistRemove, BlacklistVerify, Credentials, KnownResponseCode,
    LiveUpdateClient, Operation, TransportMode,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let phone = std::env::var("SMSLINK_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSLINK_PHONE environment variable is required",
        )
    })?;

    let mut client = LiveUpdateClient::builder(Credentials::from_env()?)
        .transport_mode(TransportMode::QueryGet)
        .build()?;

    let added = client.blacklist_add(BlacklistAdd::new(phone.as_str())).await;
    if added.status {
        println!("added to the blacklist: {}", added.message);
    } else {
        println!("could not add to the blacklist: {}", added.message);
        match added.known_code(Operation::BlacklistAdd) {
            Some(KnownResponseCode::AlreadyBlacklisted) => println!("  already blacklisted"),
            _ => println!("  failed to reach the blacklist"),
        }
    }

    let check = client.is_blacklisted(BlacklistVerify::new(phone.as_str())).await;
    if check.is_request_error {
        println!("could not query the blacklist: {}", check.response.message);
    } else if check.is_blacklisted {
        println!("blacklisted ({})", check.response.message);
        for service in check.services() {
            let name = service.known().map(|known| known.name()).unwrap_or("unknown service");
            println!("  service {service}: {name}");
        }
    } else {
        println!("not blacklisted ({})", check.response.message);
    }

    let removed = client.blacklist_remove(BlacklistRemove::new(phone.as_str())).await;
    println!(
        "remove: status={} code={} message={}",
        removed.status,
        removed.code.as_i32(),
        removed.message
    );

    for entry in client.audit_log() {
        println!("{entry}");
    }

    Ok(())
}
