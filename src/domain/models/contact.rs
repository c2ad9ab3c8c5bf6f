use crate::domain::value_objects::PhoneNumber;

const CHAT_SEND_URL: &str = "https://api.whatsapp.com/send";

/// Message used on catalog cards
pub fn catalog_message(tractor_name: &str) -> String {
    format!(
        "Olá! Tenho interesse no {}. Poderia me dar mais informações?",
        tractor_name
    )
}

/// Message used on the product detail page
pub fn detail_message(tractor_name: &str) -> String {
    format!(
        "Olá! Tenho interesse no trator {}. Poderia me dar mais informações?",
        tractor_name
    )
}

/// Deep link that opens a chat with `phone` pre-filled with `message`
pub fn contact_link(phone: &PhoneNumber, message: &str) -> String {
    format!(
        "{}?phone={}&text={}",
        CHAT_SEND_URL,
        phone.as_str(),
        encode_component(message)
    )
}

/// Percent-encode like a browser's `encodeURIComponent`, which leaves `!'()*` as is
fn encode_component(text: &str) -> String {
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_link_encodes_message() {
        let phone = PhoneNumber::new("553597400527".to_string()).unwrap();
        let link = contact_link(&phone, &catalog_message("MF 275"));

        assert_eq!(
            link,
            "https://api.whatsapp.com/send?phone=553597400527&text=Ol%C3%A1!%20Tenho%20interesse%20no%20MF%20275.%20Poderia%20me%20dar%20mais%20informa%C3%A7%C3%B5es%3F"
        );
    }

    #[test]
    fn test_encode_component_keeps_unreserved_marks() {
        assert_eq!(
            encode_component("Trator (usado)! 50% O'Neil*"),
            "Trator%20(usado)!%2050%25%20O'Neil*"
        );
    }

    #[test]
    fn test_detail_message_mentions_tractor() {
        assert!(detail_message("Valtra A750").contains("no trator Valtra A750."));
    }
}
