//! Health Check API Tests

/// Test basic health endpoint responds
#[tokio::test]
async fn test_health_check() {
    // Arrange
    // let app = TestApp::new().await;

    // Act
    // let response = app.get("/health").await;

    // Assert
    // assert_eq!(response.status(), StatusCode::OK);
    assert!(true); // Placeholder
}

/// Test liveness probe responds
#[tokio::test]
async fn test_liveness() {
    // Arrange
    // let app = TestApp::new().await;

    // Act
    // let response = app.get("/health/live").await;

    // Assert
    // assert_eq!(response.status(), StatusCode::OK);
    assert!(true); // Placeholder
}
