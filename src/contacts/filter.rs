use crate::api::Contact;

/// Narrow `contacts` to the entries matching `term`, keeping their order.
///
/// Name and email compare case-insensitively; phone is a plain substring
/// match. A blank term returns everything.
pub fn filter_contacts(contacts: &[Contact], term: &str) -> Vec<Contact> {
    if term.trim().is_empty() {
        return contacts.to_vec();
    }
    let needle = term.to_lowercase();
    contacts
        .iter()
        .filter(|c| matches_term(c, term, &needle))
        .cloned()
        .collect()
}

fn matches_term(contact: &Contact, raw: &str, lowered: &str) -> bool {
    contact.name.to_lowercase().contains(lowered)
        || contact.email.to_lowercase().contains(lowered)
        || contact.phone.contains(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ContactId;

    fn contact(id: i64, name: &str, email: &str, phone: &str) -> Contact {
        Contact {
            id: ContactId::Int(id),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            avatar: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<Contact> {
        vec![
            contact(1, "John Doe", "john.doe@example.com", "+1 (555) 123-4567"),
            contact(2, "Jane Smith", "jane.smith@example.com", "+1 (555) 234-5678"),
            contact(3, "Mike Johnson", "MIKE@Example.org", "555-0000"),
        ]
    }

    #[test]
    fn blank_term_is_identity() {
        let list = sample();
        assert_eq!(filter_contacts(&list, ""), list);
        assert_eq!(filter_contacts(&list, "   \t"), list);
    }

    #[test]
    fn search_jane_returns_only_jane() {
        let list = vec![
            contact(1, "Jane Doe", "jd@example.com", "1"),
            contact(2, "John", "j@example.com", "2"),
        ];
        let out = filter_contacts(&list, "jane");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Jane Doe");
    }

    #[test]
    fn name_and_email_ignore_case() {
        let list = sample();
        let ids: Vec<_> = filter_contacts(&list, "JOHN")
            .into_iter()
            .map(|c| c.id)
            .collect();
        // "John Doe" by name, "Mike Johnson" by name.
        assert_eq!(ids, vec![ContactId::Int(1), ContactId::Int(3)]);

        let out = filter_contacts(&list, "example.ORG");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, ContactId::Int(3));
    }

    #[test]
    fn phone_is_substring_matched() {
        let list = sample();
        let out = filter_contacts(&list, "234-56");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, ContactId::Int(2));

        assert_eq!(filter_contacts(&list, "(555)").len(), 2);
    }

    #[test]
    fn result_is_ordered_subsequence_of_input() {
        let list = sample();
        for term in ["j", "555", "e", "zzz", "@"] {
            let out = filter_contacts(&list, term);
            let mut it = list.iter();
            for c in &out {
                assert!(it.any(|x| x == c), "{term}: order or membership broken");
                let lowered = term.to_lowercase();
                assert!(
                    c.name.to_lowercase().contains(&lowered)
                        || c.email.to_lowercase().contains(&lowered)
                        || c.phone.contains(term)
                );
            }
        }
    }
}
