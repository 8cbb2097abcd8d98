use std::io::Cursor;

use super::{Command, format_contact, parse_command, run_cli_loop};
use reqwest::StatusCode;

use crate::api::{ContactDraft, ContactId};
use crate::test_support::{StubApi, contact, controller_for, sample_contacts, server_error};

async fn run_script(api: &std::sync::Arc<StubApi>, script: &str) -> String {
    let mut ctl = controller_for(api);
    let mut out = Vec::new();
    run_cli_loop(&mut ctl, Cursor::new(script.to_string()), &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn parses_commands() {
    assert_eq!(parse_command("   "), None);
    assert_eq!(parse_command("/help"), Some(Command::Help));
    assert_eq!(parse_command("/exit"), Some(Command::Quit));
    assert_eq!(
        parse_command("/search  ann lee "),
        Some(Command::Search("ann lee".into()))
    );
    assert_eq!(parse_command("/search"), Some(Command::Search(String::new())));
    assert_eq!(
        parse_command("/get 7"),
        Some(Command::Get(ContactId::Int(7)))
    );
    assert_eq!(
        parse_command("/add Ann Lee; ann@x.io ;555-0100"),
        Some(Command::Add(ContactDraft::new("Ann Lee", "ann@x.io", "555-0100")))
    );
    assert_eq!(
        parse_command("/update 3 A;a@b.co;1"),
        Some(Command::Update(
            ContactId::Int(3),
            ContactDraft::new("A", "a@b.co", "1")
        ))
    );
    assert_eq!(
        parse_command("/delete abc"),
        Some(Command::Delete(ContactId::Text("abc".into())))
    );
}

#[test]
fn bad_arguments_yield_usage() {
    assert!(matches!(parse_command("/get"), Some(Command::Usage(_))));
    assert!(matches!(parse_command("/add only;two"), Some(Command::Usage(_))));
    assert!(matches!(parse_command("/update 3"), Some(Command::Usage(_))));
    assert!(matches!(parse_command("/find"), Some(Command::Usage(_))));
    assert_eq!(
        parse_command("hello"),
        Some(Command::Unknown("hello".into()))
    );
}

#[test]
fn formats_contact_line() {
    let c = contact(4, "Dee Park", "dee@park.io");
    assert_eq!(format_contact(&c), "#4  Dee Park  <dee@park.io>  555-0100");
}

#[tokio::test]
async fn lists_and_filters_locally() {
    let api = StubApi::new(sample_contacts());
    let out = run_script(&api, "/list\n/search bob\n/search\n/quit\n").await;
    assert!(out.contains("Loaded 3 contacts"));
    assert!(out.contains("Contacts (3)"));
    assert!(out.contains("Contacts matching \"bob\" (1)"));
    assert!(out.contains("Search cleared"));
    assert_eq!(api.calls(), vec!["list"]);
}

#[tokio::test]
async fn search_without_matches_says_so() {
    let api = StubApi::new(sample_contacts());
    let out = run_script(&api, "/search nobody\n").await;
    assert!(out.contains("No contacts match \"nobody\". Try adjusting your search terms."));
}

#[tokio::test]
async fn add_validates_before_sending() {
    let api = StubApi::new(sample_contacts());
    let out = run_script(&api, "/add X;bad-email;phone!\n").await;
    assert!(out.contains("Invalid contact:"));
    assert!(out.contains("Email Address: Email is invalid"));
    assert!(!api.calls().iter().any(|c| c.starts_with("create")));
}

#[tokio::test]
async fn add_sends_valid_contact() {
    let api = StubApi::new(sample_contacts());
    let out = run_script(&api, "/add Dee Park;dee@park.io;+1 555-0123\n/list\n").await;
    assert!(out.contains("Added #99  Dee Park  <dee@park.io>  +1 555-0123"));
    assert!(out.contains("Contacts (4)"));
    assert!(api.calls().contains(&"create Dee Park".to_string()));
}

#[tokio::test]
async fn delete_needs_yes() {
    let api = StubApi::new(sample_contacts());
    let out = run_script(&api, "/delete 2\nn\n/list\n").await;
    assert!(out.contains("Are you sure you want to delete Bob Roy? This action cannot be undone."));
    assert!(out.contains("Cancelled"));
    assert!(out.contains("Contacts (3)"));
    assert!(!api.calls().iter().any(|c| c.starts_with("delete")));

    let out = run_script(&api, "/delete 2\ny\n/list\n").await;
    assert!(out.contains("Deleted Bob Roy"));
    assert!(out.contains("Contacts (2)"));
    assert!(api.calls().contains(&"delete 2".to_string()));
}

#[tokio::test]
async fn update_get_find_and_health_hit_the_service() {
    let api = StubApi::new(sample_contacts());
    let out = run_script(
        &api,
        "/update 1 Ann Lee-Roy;ann@x.io;555-0199\n/get 3\n/find cy\n/health\n/retry\n",
    )
    .await;
    assert!(out.contains("Updated #1  Ann Lee-Roy  <ann@x.io>  555-0199"));
    assert!(out.contains("#3  Cy Tan  <cy@z.io>  555-0100"));
    assert!(out.contains("avatar: https://ui-avatars.com/api/"));
    assert!(out.contains("Server matches (1)"));
    assert!(out.contains("Service is healthy"));
    assert!(out.contains("Nothing to retry"));
    assert_eq!(
        api.calls(),
        vec!["list", "update 1", "get 3", "search cy", "health"]
    );
}

#[tokio::test]
async fn failed_load_can_be_retried() {
    let api = StubApi::new(sample_contacts());
    api.push_list(Err(server_error(StatusCode::SERVICE_UNAVAILABLE, "db down")));
    let out = run_script(&api, "/list\n/retry\n/list\n").await;
    assert!(out.contains("Error: db down (type /retry to try again)"));
    assert!(out.contains("Loaded 3 contacts"));
    assert!(out.contains("Contacts (3)"));
    assert_eq!(api.calls(), vec!["list", "list"]);
}
