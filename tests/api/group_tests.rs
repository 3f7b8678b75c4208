//! Group API Tests

/// End-to-end: creating a group makes the creator sole member and admin
#[tokio::test]
async fn test_create_group_creator_is_sole_member_and_admin() {
    // Arrange - sign up user C, sign in
    // Act
    // let body = json!({ "name": "book club" });
    // let response = app.post_json_auth("/api/groups", &body.to_string(), &c_token).await;
    // Assert
    // assert_eq!(response.status(), StatusCode::OK);
    // The group has exactly one member and one administrator, both C.
    assert!(true); // Placeholder
}

/// Adding a fourth administrator is rejected by the store
#[tokio::test]
async fn test_fourth_administrator_is_rejected() {
    // Arrange - group with three administrators
    // Act
    // let body = json!({ "targetUserId": d_id });
    // let response = app.post_json_auth(&format!("/api/groups/{}/admins", group_id), ...).await;
    // Assert
    // assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    // The error body passes the store's constraint message through.
    assert!(true); // Placeholder
}

/// Removing the last administrator is rejected by the store
#[tokio::test]
async fn test_removing_last_administrator_is_rejected() {
    // Arrange - group with a single administrator
    // Act - DELETE /api/groups/{group_id}/admins targeting that admin
    // Assert
    // assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(true); // Placeholder
}

/// A member who is not an administrator cannot mutate membership
#[tokio::test]
async fn test_non_admin_member_cannot_add_members() {
    // Arrange - group with admin A and plain member B
    // Act - POST /api/groups/{group_id}/members as B
    // Assert
    // assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(true); // Placeholder
}

/// A non-member cannot send into the group
#[tokio::test]
async fn test_non_member_cannot_send_message() {
    // Arrange - group without user D
    // Act - POST /api/groups/{group_id}/messages as D
    // Assert
    // assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(true); // Placeholder
}

/// Deleting a group deletes its messages but not its members' accounts
#[tokio::test]
async fn test_delete_group_cascades_messages() {
    // Arrange - group with several messages
    // Act - DELETE /api/groups/{group_id} as an administrator
    // Assert
    // assert_eq!(response.status(), StatusCode::OK);
    // Owned messages are gone; member users still exist.
    assert!(true); // Placeholder
}
