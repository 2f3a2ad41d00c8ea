use std::time::Duration;

use axum::http::StatusCode;
use chrono::DateTime;
use serde_json::Value;

use crate::tests::helper;

#[tokio::test]
async fn test_notes() {
    let mut app = helper::setup_test_app().await;

    // setup
    let campaign = helper::create_campaign(&mut app, "Curse of Strahd", None).await;
    let campaign_id = campaign.id.to_string();

    let content_one = "The party arrives in the village of Barovia";
    let content_two = "Ireena joins the party";

    // verify empty note list
    let (status_code, notes, _) = helper::list_campaign_notes(&mut app, &campaign_id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(Vec::<helper::Note>::new()), notes);

    // create note
    let payload = helper::note_payload(Some(campaign.id), Some("Session 1"), Some(content_one));
    let (status_code, note, _) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::CREATED, status_code);
    assert!(note.is_some());
    let note = note.unwrap();
    assert!(note.id > 0);
    assert_eq!(campaign.id, note.campaign_id);
    assert_eq!("Curse of Strahd".to_string(), note.campaign_name);
    assert_eq!(Some("Session 1".to_string()), note.title);
    assert_eq!(content_one.to_string(), note.content);

    // verify note
    let (status_code, fetched, _) = helper::single_note(&mut app, &note.id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(note.clone()), fetched);

    // create note without title
    let other = helper::create_note(&mut app, campaign.id, None, content_two).await;
    assert_eq!(None, other.title);

    // fetch notes, both are included in order
    let (status_code, notes, _) = helper::list_campaign_notes(&mut app, &campaign_id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(vec![note.clone(), other.clone()]), notes);

    let (status_code, notes) = helper::list_notes(&mut app).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(vec![note, other]), notes);
}

#[tokio::test]
async fn test_notes_by_campaign_name() {
    let mut app = helper::setup_test_app().await;

    let first = helper::create_campaign(&mut app, "Lost Mine", None).await;
    let second = helper::create_campaign(&mut app, "Lost Mine", None).await;

    // create note by campaign name, the first campaign with that name wins
    let mut payload = helper::note_payload(None, None, Some("Goblin ambush"));
    payload.insert(
        "campaign_name".to_string(),
        Value::String("Lost Mine".to_string()),
    );
    let (status_code, note, _) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::CREATED, status_code);
    let note = note.unwrap();
    assert_eq!(first.id, note.campaign_id);
    assert_eq!("Lost Mine".to_string(), note.campaign_name);

    // list notes by campaign name
    let (status_code, notes, _) = helper::list_campaign_notes(&mut app, "Lost%20Mine").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(vec![note]), notes);

    // the second campaign has no notes
    let (status_code, notes, _) =
        helper::list_campaign_notes(&mut app, &second.id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(Vec::<helper::Note>::new()), notes);
}

#[tokio::test]
async fn test_notes_of_unknown_campaign() {
    let mut app = helper::setup_test_app().await;

    let (status_code, notes, error) = helper::list_campaign_notes(&mut app, "999").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(None, notes);
    assert_eq!(Some("Campaign not found".to_string()), error);

    let (status_code, _, error) = helper::list_campaign_notes(&mut app, "Nowhere").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Campaign not found".to_string()), error);
}

#[tokio::test]
async fn test_create_note_with_unknown_campaign() {
    let mut app = helper::setup_test_app().await;

    // by ID
    let payload = helper::note_payload(Some(999), None, Some("Lost in the mists"));
    let (status_code, note, error) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(None, note);
    assert_eq!(Some("Campaign not found".to_string()), error);

    // by name
    let mut payload = helper::note_payload(None, None, Some("Lost in the mists"));
    payload.insert(
        "campaign_name".to_string(),
        Value::String("Nowhere".to_string()),
    );
    let (status_code, _, error) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Campaign not found".to_string()), error);

    // nothing was stored
    let (_, notes) = helper::list_notes(&mut app).await;
    assert_eq!(Some(Vec::<helper::Note>::new()), notes);
}

#[tokio::test]
async fn test_create_note_campaign_reference() {
    let mut app = helper::setup_test_app().await;

    let campaign = helper::create_campaign(&mut app, "Tomb of Annihilation", None).await;

    // neither
    let payload = helper::note_payload(None, None, Some("Port Nyanzaru"));
    let (status_code, _, error) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(
        Some("Campaign is required, use `campaign_id` or `campaign_name`".to_string()),
        error
    );

    // both
    let mut payload = helper::note_payload(Some(campaign.id), None, Some("Port Nyanzaru"));
    payload.insert(
        "campaign_name".to_string(),
        Value::String("Tomb of Annihilation".to_string()),
    );
    let (status_code, _, error) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(
        Some("Use either `campaign_id` or `campaign_name`, not both".to_string()),
        error
    );
}

#[tokio::test]
async fn test_create_note_validation() {
    let mut app = helper::setup_test_app().await;

    let campaign = helper::create_campaign(&mut app, "Waterdeep", None).await;

    // missing content
    let payload = helper::note_payload(Some(campaign.id), Some("Dragon Heist"), None);
    let (status_code, _, error) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Content is required".to_string()), error);

    // blank content
    let payload = helper::note_payload(Some(campaign.id), None, Some("  "));
    let (status_code, _, error) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Content can not be empty".to_string()), error);

    // title too long
    let title = "t".repeat(151);
    let payload = helper::note_payload(Some(campaign.id), Some(&title), Some("Fireball"));
    let (status_code, _, error) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(
        Some("Title can not be longer than 150 characters".to_string()),
        error
    );

    // NUL in content or title
    let payload = helper::note_payload(Some(campaign.id), None, Some("Fire\u{0}ball"));
    let (status_code, _, error) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(
        Some("Content can not contain NUL characters".to_string()),
        error
    );

    let payload = helper::note_payload(Some(campaign.id), Some("\u{0}"), Some("Fireball"));
    let (status_code, _, error) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(
        Some("Title can not contain NUL characters".to_string()),
        error
    );

    // blank title is kept as is
    let note = helper::create_note(&mut app, campaign.id, Some(""), "Fireball").await;
    assert_eq!(Some(String::new()), note.title);
}

#[tokio::test]
async fn test_update_note() {
    let mut app = helper::setup_test_app().await;

    let campaign = helper::create_campaign(&mut app, "Descent into Avernus", None).await;
    let note = helper::create_note(&mut app, campaign.id, Some("Session 1"), "Elturel falls").await;

    // make sure the clock moves on
    tokio::time::sleep(Duration::from_millis(5)).await;

    // update content
    let payload = helper::note_payload(None, None, Some("Elturel falls into Avernus"));
    let (status_code, updated, _) = helper::maybe_update_note(&mut app, note.id, &payload).await;
    assert_eq!(StatusCode::OK, status_code);
    let updated = updated.unwrap();
    assert_eq!(note.id, updated.id);
    assert_eq!(Some("Session 1".to_string()), updated.title);
    assert_eq!("Elturel falls into Avernus".to_string(), updated.content);
    assert_eq!(note.created_at, updated.created_at);

    let before = DateTime::parse_from_rfc3339(&note.updated_at).unwrap();
    let after = DateTime::parse_from_rfc3339(&updated.updated_at).unwrap();
    assert!(after > before);

    // blank content is rejected
    let payload = helper::note_payload(None, None, Some(""));
    let (status_code, _, error) = helper::maybe_update_note(&mut app, note.id, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Content can not be empty".to_string()), error);

    // unknown note
    let payload = helper::note_payload(None, Some("Session 2"), None);
    let (status_code, _, error) = helper::maybe_update_note(&mut app, 999, &payload).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Note not found".to_string()), error);

    // verify note
    let (_, fetched, _) = helper::single_note(&mut app, &note.id.to_string()).await;
    assert_eq!(Some(updated), fetched);
}

#[tokio::test]
async fn test_note_follows_campaign_rename() {
    let mut app = helper::setup_test_app().await;

    let campaign = helper::create_campaign(&mut app, "Hoard of the Dragon Queen", None).await;
    let note = helper::create_note(&mut app, campaign.id, None, "Greenest is burning").await;

    let payload = helper::campaign_payload(Some("Tyranny of Dragons"), None);
    let (status_code, _, _) = helper::maybe_update_campaign(&mut app, campaign.id, &payload).await;
    assert_eq!(StatusCode::OK, status_code);

    let (_, fetched, _) = helper::single_note(&mut app, &note.id.to_string()).await;
    assert_eq!(
        "Tyranny of Dragons".to_string(),
        fetched.unwrap().campaign_name
    );
}

#[tokio::test]
async fn test_delete_note() {
    let mut app = helper::setup_test_app().await;

    let campaign = helper::create_campaign(&mut app, "Princes of the Apocalypse", None).await;
    let note = helper::create_note(&mut app, campaign.id, None, "Red Larch").await;
    let other = helper::create_note(&mut app, campaign.id, None, "Feathergale Spire").await;

    let id = note.id.to_string();

    // delete note
    let (status_code, message) = helper::maybe_delete_note(&mut app, &id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("Note deleted".to_string(), message);

    // note is gone
    let (status_code, _, error) = helper::single_note(&mut app, &id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Note not found".to_string()), error);

    // deleting again is not found
    let (status_code, message) = helper::maybe_delete_note(&mut app, &id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("Note not found".to_string(), message);

    // other note is untouched
    let (_, notes, _) = helper::list_campaign_notes(&mut app, &campaign.id.to_string()).await;
    assert_eq!(Some(vec![other]), notes);
}

#[tokio::test]
async fn test_delete_campaign_deletes_notes() {
    let mut app = helper::setup_test_app().await;

    let campaign = helper::create_campaign(&mut app, "Ghosts of Saltmarsh", None).await;
    let other = helper::create_campaign(&mut app, "Candlekeep Mysteries", None).await;

    let note = helper::create_note(&mut app, campaign.id, None, "The haunted house").await;
    let kept = helper::create_note(&mut app, other.id, None, "A book of secrets").await;

    let (status_code, _) = helper::maybe_delete_campaign(&mut app, &campaign.id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);

    // note went with the campaign
    let (status_code, _, _) = helper::single_note(&mut app, &note.id.to_string()).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);

    let (status_code, _, _) = helper::list_campaign_notes(&mut app, &campaign.id.to_string()).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);

    // notes of other campaigns are kept
    let (_, notes) = helper::list_notes(&mut app).await;
    assert_eq!(Some(vec![kept]), notes);
}

#[tokio::test]
async fn test_invalid_note_id() {
    let mut app = helper::setup_test_app().await;

    let (status_code, note, error) = helper::single_note(&mut app, "first").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(None, note);
    assert_eq!(Some("Invalid path parameter".to_string()), error);
}
