//! Chat API Tests

/// End-to-end: a first message between two users creates the chat
#[tokio::test]
async fn test_first_message_creates_chat() {
    // Arrange - sign up users A and B, sign in as A
    // let app = TestApp::new().await;

    // Act - A sends the first message to B (no existing chat)
    // let body = json!({
    //     "contentType": "text",
    //     "text": "hello",
    //     "receiverId": b_id
    // });
    // let response = app.post_json_auth("/api/chats", &body.to_string(), &a_token).await;

    // Assert
    // assert_eq!(response.status(), StatusCode::OK);
    // A chat now exists containing exactly one message, and both A's and
    // B's chat lists contain that chat's id.
    assert!(true); // Placeholder
}

/// A second message between the same pair reuses the chat
#[tokio::test]
async fn test_second_message_does_not_create_second_chat() {
    // Arrange - users A and B with an existing chat
    // Act - A sends another message to B
    // Assert - still exactly one chat for the pair, now with two messages
    assert!(true); // Placeholder
}

/// Deleting a chat removes it from both participants and deletes its messages
#[tokio::test]
async fn test_delete_chat_cascades() {
    // Arrange - users A and B with a chat holding several messages
    // Act - DELETE /api/chats/{chat_id} as A
    // Assert
    // assert_eq!(response.status(), StatusCode::OK);
    // Neither A's nor B's chat list contains the chat id; all owned
    // messages are gone.
    assert!(true); // Placeholder
}

/// A non-participant cannot delete a chat
#[tokio::test]
async fn test_outsider_cannot_delete_chat() {
    // Arrange - users A and B with a chat; sign in as C
    // Act - DELETE /api/chats/{chat_id} as C
    // Assert
    // assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(true); // Placeholder
}

/// Only the sender may delete a direct message
#[tokio::test]
async fn test_only_sender_deletes_message() {
    // Arrange - A sends a message to B
    // Act - DELETE /api/chats/{chat_id}/messages/{message_id} as B
    // Assert
    // assert_eq!(response.status(), StatusCode::FORBIDDEN);
    // Act again as A
    // Assert - OK, and the chat's message list no longer contains the id
    assert!(true); // Placeholder
}

/// Sending with a mistyped body field is rejected before any mutation
#[tokio::test]
async fn test_mistyped_body_is_rejected() {
    // Arrange
    // let body = json!({ "contentType": "text", "text": 7, "receiverId": b_id });
    // Act - POST /api/chats
    // Assert
    // assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(true); // Placeholder
}
