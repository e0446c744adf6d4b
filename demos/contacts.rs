use std::io;

use smslink::{
    ContactVariables, CreateContact, Credentials, LiveUpdateClient, Operation, RemoveContact,
    UpdateContact,
};

fn required(var: &str) -> Result<String, io::Error> {
    std::env::var(var).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{var} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let phone = required("SMSLINK_PHONE")?;
    let group: u32 = required("SMSLINK_GROUP_ID")?.parse()?;

    let mut client = LiveUpdateClient::new(Credentials::from_env()?);
    if let Ok(mode) = std::env::var("SMSLINK_TRANSPORT") {
        if !client.set_transport_mode_name(&mode) {
            eprintln!("unknown transport {mode}, keeping {}", client.transport_mode());
        }
    }

    let variables: ContactVariables = [
        ("dynamic_variabile_1", "value 1"),
        ("dynamic_variabile_2", "value 2"),
    ]
    .into_iter()
    .collect();

    let created = client
        .create_contact(
            CreateContact::new(phone.as_str(), group)
                .name("Popescu Gabriel")
                .variables(variables),
        )
        .await;
    report("create", Operation::ContactCreate, &created);

    let updated = client
        .update_contact(
            UpdateContact::new(phone.as_str())
                .group(group)
                .name("Popescu Gabriel George")
                .variable("dynamic_variabile_1", "updated value 1"),
        )
        .await;
    report("update", Operation::ContactUpdate, &updated);

    let removed = client
        .remove_contact(RemoveContact::new(phone.as_str()).group(group))
        .await;
    report("remove", Operation::ContactRemove, &removed);

    if let Some(entry) = client.last_audit_entry() {
        println!("{entry}");
    }

    Ok(())
}

fn report(action: &str, operation: Operation, response: &smslink::LiveUpdateResponse) {
    if response.status {
        println!("{action}: {}", response.message);
        return;
    }
    let meaning = response
        .known_code(operation)
        .map(|known| known.description())
        .unwrap_or("failed to reach the specified group");
    println!("{action} failed: {} ({meaning})", response.message);
}
