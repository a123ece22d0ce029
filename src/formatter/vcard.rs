use crate::models::Contact;

/// vCard 3.0 with a fixed field order; empty fields stay as empty lines
pub fn format_contact(contact: &Contact) -> String {
    let Contact {
        first_name,
        last_name,
        phone,
        email,
        organization,
        url,
    } = contact;

    [
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{first_name} {last_name}"),
        format!("N:{last_name};{first_name};;;"),
        format!("ORG:{organization}"),
        format!("TEL:{phone}"),
        format!("EMAIL:{email}"),
        format!("URL:{url}"),
        "END:VCARD".to_string(),
    ]
    .join("\n")
}
