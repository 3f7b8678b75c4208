//! Authentication API Tests

/// Test signup with valid data
#[tokio::test]
async fn test_sign_up_with_valid_data() {
    // Arrange
    // let app = TestApp::new().await;
    // let body = json!({
    //     "firstName": "Test",
    //     "lastName": "User",
    //     "email": unique_email(),
    //     "password": "ValidPassword123!"
    // });

    // Act
    // let response = app.post_json("/api/users", &body.to_string()).await;

    // Assert
    // assert_eq!(response.status(), StatusCode::OK);
    // Response body carries a `message` field
    assert!(true); // Placeholder
}

/// Test signup fails with a missing field
#[tokio::test]
async fn test_sign_up_with_missing_field_fails() {
    // Arrange
    // let app = TestApp::new().await;
    // let body = json!({
    //     "firstName": "Test",
    //     "email": unique_email(),
    //     "password": "ValidPassword123!"
    // });

    // Act
    // let response = app.post_json("/api/users", &body.to_string()).await;

    // Assert
    // assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    // Response body carries an `error` field
    assert!(true); // Placeholder
}

/// Test signup fails with short password
#[tokio::test]
async fn test_sign_up_with_short_password_fails() {
    // Arrange
    // let app = TestApp::new().await;
    // let body = json!({
    //     "firstName": "Test",
    //     "lastName": "User",
    //     "email": unique_email(),
    //     "password": "short"
    // });

    // Act
    // let response = app.post_json("/api/users", &body.to_string()).await;

    // Assert
    // assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(true); // Placeholder
}

/// Test signin with valid credentials returns a token
#[tokio::test]
async fn test_sign_in_with_valid_credentials() {
    // Arrange - sign up a user first
    // let app = TestApp::new().await;
    // let email = unique_email();
    // ...sign up...

    // Act
    // let body = json!({ "email": email, "password": "ValidPassword123!" });
    // let response = app.post_json("/auth/signin", &body.to_string()).await;

    // Assert
    // assert_eq!(response.status(), StatusCode::OK);
    // Response contains `token` and `user`
    assert!(true); // Placeholder
}

/// Test signin with wrong password fails
#[tokio::test]
async fn test_sign_in_with_invalid_credentials_fails() {
    // Arrange
    // let app = TestApp::new().await;
    // let body = json!({
    //     "email": "nonexistent@example.com",
    //     "password": "WrongPassword123!"
    // });

    // Act
    // let response = app.post_json("/auth/signin", &body.to_string()).await;

    // Assert
    // assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(true); // Placeholder
}

/// Test mutating another user's profile is forbidden
#[tokio::test]
async fn test_update_other_user_is_forbidden() {
    // Arrange - sign up two users, sign in as the first
    // Act - PUT /api/users/{second_user_id} with the first user's token
    // Assert
    // assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(true); // Placeholder
}
