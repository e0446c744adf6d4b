use crate::domain::{
    BlacklistAdd, BlacklistRemove, BlacklistVerify, Operation, PhoneNumber, ServiceId,
    ValidationError,
};

use super::form::pair;

pub fn encode_blacklist_add_form(
    request: &BlacklistAdd,
) -> Result<Vec<(String, String)>, ValidationError> {
    let phone = PhoneNumber::new(request.phone())?;
    let mut params = vec![
        pair(Operation::FIELD, Operation::BlacklistAdd.mode()),
        pair(PhoneNumber::FIELD, phone.as_str()),
        pair("force_update", u8::from(request.is_forced())),
    ];
    if !request.services().is_empty() {
        let ids = request
            .services()
            .iter()
            .map(ServiceId::to_string)
            .collect::<Vec<_>>()
            .join(",");
        params.push(pair(ServiceId::FIELD, ids));
    }
    Ok(params)
}

pub fn encode_blacklist_remove_form(
    request: &BlacklistRemove,
) -> Result<Vec<(String, String)>, ValidationError> {
    encode_phone_only(Operation::BlacklistRemove, request.phone())
}

pub fn encode_blacklist_verify_form(
    request: &BlacklistVerify,
) -> Result<Vec<(String, String)>, ValidationError> {
    encode_phone_only(Operation::BlacklistVerify, request.phone())
}

fn encode_phone_only(
    operation: Operation,
    phone: &str,
) -> Result<Vec<(String, String)>, ValidationError> {
    let phone = PhoneNumber::new(phone)?;
    Ok(vec![
        pair(Operation::FIELD, operation.mode()),
        pair(PhoneNumber::FIELD, phone.as_str()),
    ])
}
