//! Concurrency tests for token generation
//!
//! A shared client must be usable from many threads at once.

use std::collections::HashSet;
use std::thread;
use vc_server_sdk::{decode_token, Role, TokenOptions, TokenType};
use vc_test_utils::*;

/// Test that concurrent generation from a shared client yields valid, distinct tokens
#[test]
fn test_concurrent_generation_shares_client() {
    let client = test_client();
    let session_id = test_session_id(TEST_PROJECT_ID);

    let tokens: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let client = &client;
                let session_id = &session_id;
                scope.spawn(move || {
                    let token_type = if i % 2 == 0 {
                        TokenType::T1
                    } else {
                        TokenType::Jwt
                    };
                    (0..25)
                        .map(|_| {
                            client
                                .generate_token(
                                    session_id,
                                    &TokenOptions::new()
                                        .with_role(Role::Subscriber)
                                        .with_token_type(token_type),
                                )
                                .expect("generation should succeed")
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().expect("worker should not panic"))
            .collect()
    });

    assert_eq!(tokens.len(), 200);
    let unique: HashSet<_> = tokens.iter().collect();
    assert_eq!(unique.len(), tokens.len(), "Every token should be unique");

    for token in &tokens {
        let claims = decode_token(client.credential(), token).expect("token should verify");
        assert_eq!(claims.role, Role::Subscriber);
    }
}
