use crate::domain::{
    CONTACT_VARIABLES_MAX, ConnectionId, ContactVariables, CreateContact, DuplicateScope, GroupId,
    Operation, Password, PhoneNumber, RemoveContact, ServiceId, UpdateContact, ValidationError,
};

use super::form::pair;

const RECEIVER_NAME: &str = "receiver_name";
const DUPLICATE: &str = "duplicate";

/// Parameter names a contact variable may not shadow.
const RESERVED_NAMES: &[&str] = &[
    ConnectionId::FIELD,
    Password::FIELD,
    Operation::FIELD,
    PhoneNumber::FIELD,
    GroupId::FIELD,
    ServiceId::FIELD,
    DuplicateScope::FIELD,
    DUPLICATE,
    RECEIVER_NAME,
    "force_update",
];

pub fn encode_create_contact_form(
    request: &CreateContact,
) -> Result<Vec<(String, String)>, ValidationError> {
    let phone = PhoneNumber::new(request.phone())?;
    if request.group().is_all() {
        return Err(ValidationError::InvalidGroupId);
    }
    check_variables(request.contact_variables())?;

    let mut params = vec![
        pair(Operation::FIELD, Operation::ContactCreate.mode()),
        pair(PhoneNumber::FIELD, phone.as_str()),
        pair(GroupId::FIELD, request.group().as_u32()),
        pair(DUPLICATE, u8::from(!request.allows_duplicate())),
        pair(DuplicateScope::FIELD, request.scope().code()),
        pair(RECEIVER_NAME, request.full_name().unwrap_or_default()),
    ];
    push_variables(&mut params, request.contact_variables());
    Ok(params)
}

pub fn encode_update_contact_form(
    request: &UpdateContact,
) -> Result<Vec<(String, String)>, ValidationError> {
    let phone = PhoneNumber::new(request.phone())?;
    check_variables(request.contact_variables())?;

    let mut params = vec![
        pair(Operation::FIELD, Operation::ContactUpdate.mode()),
        pair(PhoneNumber::FIELD, phone.as_str()),
        pair(GroupId::FIELD, request.group_id().as_u32()),
        pair(RECEIVER_NAME, request.full_name().unwrap_or_default()),
    ];
    push_variables(&mut params, request.contact_variables());
    Ok(params)
}

pub fn encode_remove_contact_form(
    request: &RemoveContact,
) -> Result<Vec<(String, String)>, ValidationError> {
    let phone = PhoneNumber::new(request.phone())?;
    Ok(vec![
        pair(Operation::FIELD, Operation::ContactRemove.mode()),
        pair(PhoneNumber::FIELD, phone.as_str()),
        pair(GroupId::FIELD, request.group_id().as_u32()),
    ])
}

fn check_variables(variables: &ContactVariables) -> Result<(), ValidationError> {
    if variables.len() > CONTACT_VARIABLES_MAX {
        return Err(ValidationError::TooManyContactVariables {
            max: CONTACT_VARIABLES_MAX,
            actual: variables.len(),
        });
    }
    for (name, _) in variables.iter() {
        if name.trim().is_empty() || RESERVED_NAMES.contains(&name) {
            return Err(ValidationError::InvalidContactVariableName {
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

fn push_variables(params: &mut Vec<(String, String)>, variables: &ContactVariables) {
    params.extend(variables.iter().map(|(name, value)| pair(name, value)));
}
