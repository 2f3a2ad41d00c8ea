use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_invalid_json() {
    let mut app = helper::setup_test_app().await;

    // wrong type
    let body = r#"{"name":1}"#;
    let (status_code, error) =
        helper::maybe_create_campaign_with_raw_body(&mut app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(error.is_some());
    let error = error.unwrap();
    assert_eq!("Data error".to_string(), error.message);
    assert!(error.detail.unwrap().contains("invalid type: integer `1`"));

    // wrong type, the nested value is never parsed
    let body = r#"{"name":{"bar":}}"#;
    let (status_code, error) =
        helper::maybe_create_campaign_with_raw_body(&mut app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(error.is_some());
    let error = error.unwrap();
    assert_eq!("Data error".to_string(), error.message);
    assert!(error.detail.unwrap().contains("invalid type: map"));

    // syntax error
    let body = r#"{"}"#;
    let (status_code, error) =
        helper::maybe_create_campaign_with_raw_body(&mut app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(error.is_some());
    let error = error.unwrap();
    assert_eq!("JSON syntax error".to_string(), error.message);
    assert!(
        error
            .detail
            .unwrap()
            .contains("EOF while parsing a string at line 1 column 3")
    );

    // syntax error in an unknown field
    let body = r#"{"foo":{"bar":}}"#;
    let (status_code, error) =
        helper::maybe_create_campaign_with_raw_body(&mut app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(error.is_some());
    let error = error.unwrap();
    assert_eq!("JSON syntax error".to_string(), error.message);
    assert!(
        error
            .detail
            .unwrap()
            .contains("expected value at line 1 column 15")
    );

    // missing content type
    let body = r#"{"name":"Curse of Strahd"}"#;
    let (status_code, error) =
        helper::maybe_create_campaign_with_raw_body(&mut app, body, false).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(error.is_some());
    let error = error.unwrap();
    assert_eq!(
        "Missing `application/json` content type".to_string(),
        error.message
    );
    assert_eq!(None, error.detail);

    // nothing was stored
    let (_, campaigns) = helper::list_campaigns(&mut app).await;
    assert_eq!(Some(Vec::<helper::Campaign>::new()), campaigns);
}
