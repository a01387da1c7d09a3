//! Outbound notification deep link.
//!
//! The core never sends anything; it only builds the wa.me link a
//! technician can tap to send the drafted message themselves.

/// Build a WhatsApp deep link from a phone number and message text.
///
/// The phone is reduced to its digits and the message percent-encoded.
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{}?text={}", digits, percent_encode(message))
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn percent_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => {
                out.push('%');
                out.push_str(&format!("{:02X}", other));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_non_digits_from_phone() {
        let link = whatsapp_link("+1 (234) 567-8900", "hi");
        assert!(link.starts_with("https://wa.me/12345678900?text="));
    }

    #[test]
    fn encodes_message_text() {
        let link = whatsapp_link("123", "Hi John, your iPhone 13 is ready! Total: $250.00");
        assert_eq!(
            link,
            "https://wa.me/123?text=Hi%20John%2C%20your%20iPhone%2013%20is%20ready%21%20Total%3A%20%24250.00"
        );
    }

    #[test]
    fn leaves_unreserved_characters_alone() {
        let link = whatsapp_link("123", "a-b_c.d~e");
        assert_eq!(link, "https://wa.me/123?text=a-b_c.d~e");
    }
}
