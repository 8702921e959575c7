use spotdash::api::{CallbackParams, CallbackResult};
use spotdash::oauth::{FailureReason, LoginError, parse_token_response};
use spotdash::types::{Album, Artist, SimpleArtist, Track};
use spotdash::utils::*;

fn artist(name: &str) -> SimpleArtist {
    SimpleArtist {
        id: format!("{}_id", name),
        name: name.to_string(),
    }
}

fn track(name: &str, artists: &[&str]) -> Track {
    Track {
        id: format!("{}_id", name),
        name: name.to_string(),
        artists: artists.iter().map(|a| artist(a)).collect(),
    }
}

#[test]
fn test_generate_state() {
    let state = generate_state();
    assert_eq!(state.len(), STATE_LENGTH);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    assert_eq!(verifier.len(), CODE_VERIFIER_LENGTH);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(verifier, generate_code_verifier());
}

#[test]
fn test_generate_code_challenge() {
    // RFC 7636 appendix B
    assert_eq!(
        generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
        "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
    );
    assert_eq!(
        generate_code_challenge("abc"),
        generate_code_challenge("abc")
    );
    assert_ne!(generate_code_challenge("abc"), generate_code_challenge("abd"));
}

#[test]
fn test_dedup_ordered() {
    assert_eq!(
        dedup_ordered(["b", "a", "b", " ", "c", "a"]),
        vec!["b".to_string(), "a".to_string(), "c".to_string()]
    );
    assert!(dedup_ordered(Vec::<String>::new()).is_empty());
}

#[test]
fn test_format_wrapped() {
    let tracks = vec![
        track("Habits", &["Tove Lo"]),
        track("Cool Girl", &["Tove Lo", "Someone Else"]),
    ];
    let artists = vec![Artist {
        id: "tove".to_string(),
        name: "Tove Lo".to_string(),
        genres: vec!["pop".to_string()],
    }];

    assert_eq!(
        format_wrapped(&tracks, &artists),
        "Your Spotify Wrapped Data:\n\nTop Tracks:\n\
         1. Habits by Tove Lo\n\
         2. Cool Girl by Tove Lo, Someone Else\n\
         \nTop Artists:\n\
         1. Tove Lo\n"
    );
}

#[test]
fn test_format_new_releases() {
    let albums = vec![
        Album {
            id: "a1".to_string(),
            name: "Dirt Femme".to_string(),
            release_date: "2022-10-14".to_string(),
            album_type: "album".to_string(),
            artists: vec![artist("Tove Lo")],
        },
        Album {
            id: "a2".to_string(),
            name: "Single Thing".to_string(),
            release_date: String::new(),
            album_type: "single".to_string(),
            artists: vec![],
        },
    ];

    assert_eq!(
        format_new_releases(&albums),
        "- Dirt Femme\n- Single Thing\n"
    );
    assert_eq!(format_new_releases(&[]), "");
}

#[test]
fn test_callback_params_from_query_map() {
    let query: std::collections::HashMap<String, String> = [
        ("code", "ABC123"),
        ("state", "XYZ"),
        ("unrelated", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let params = CallbackParams::from(query);
    assert_eq!(params.code.as_deref(), Some("ABC123"));
    assert_eq!(params.state.as_deref(), Some("XYZ"));
    assert!(params.error.is_none());
    assert!(params.error_description.is_none());
}

#[test]
fn test_track_table_rows_are_numbered() {
    let rows = track_table_rows(&[track("A", &["X"]), track("B", &["Y", "Z"])]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[1].position, 2);
    assert_eq!(rows[1].artists, "Y, Z");
}

#[test]
fn test_callback_params_to_result() {
    let ok = CallbackResult::from(CallbackParams {
        code: Some("ABC123".to_string()),
        state: Some("XYZ".to_string()),
        ..Default::default()
    });
    assert_eq!(
        ok,
        CallbackResult::Authorized {
            code: "ABC123".to_string(),
            state: Some("XYZ".to_string()),
        }
    );

    // an error wins over a code
    let denied = CallbackResult::from(CallbackParams {
        code: Some("ABC123".to_string()),
        error: Some("access_denied".to_string()),
        ..Default::default()
    });
    assert!(matches!(denied, CallbackResult::Denied { ref error, .. } if error == "access_denied"));

    let empty = CallbackResult::from(CallbackParams {
        code: Some(String::new()),
        ..Default::default()
    });
    assert!(matches!(empty, CallbackResult::Denied { ref error, .. } if error == "invalid_request"));
}

#[test]
fn test_parse_token_response() {
    let token =
        parse_token_response(r#"{"access_token":"T1","refresh_token":"R1","expires_in":3600}"#)
            .unwrap();
    assert_eq!(token.access_token, "T1");
    assert_eq!(token.refresh_token.as_deref(), Some("R1"));
    assert_eq!(token.expires_in, 3600);

    let no_refresh = parse_token_response(r#"{"access_token":"T1","expires_in":60}"#).unwrap();
    assert!(no_refresh.refresh_token.is_none());

    for body in [
        "",
        "{}",
        r#"{"access_token":"","expires_in":60}"#,
        r#"{"access_token":"T1"}"#,
    ] {
        let err = parse_token_response(body).unwrap_err();
        assert_eq!(err.kind(), FailureReason::TokenExchange, "{}", body);
    }
}

#[test]
fn test_login_error_messages() {
    let denied = LoginError::CallbackDenied {
        error: "access_denied".to_string(),
        description: Some("User denied".to_string()),
    };
    assert_eq!(denied.to_string(), "authorization denied: access_denied (User denied)");
    assert_eq!(denied.kind(), FailureReason::CallbackDenied);

    let bare = LoginError::CallbackDenied {
        error: "access_denied".to_string(),
        description: None,
    };
    assert_eq!(bare.to_string(), "authorization denied: access_denied");
    assert_eq!(FailureReason::CallbackTimeout.to_string(), "callback-timeout");
}
