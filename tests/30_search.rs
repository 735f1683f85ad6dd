mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Seed 20 contacts (First1..First20 / Last1..Last20) and return their ids in
/// insertion order
async fn seed_contacts(
    client: &reqwest::Client,
    server: &common::TestServer,
    token: &str,
) -> Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(20);
    for i in 1..=20 {
        let id = common::create_contact(
            client,
            server,
            token,
            json!({
                "first_name": format!("First{}", i),
                "last_name": format!("Last{}", i),
                "email": format!("test{}@example.com", i),
                "phone": format!("08{:03}", i)
            }),
        )
        .await?;
        ids.push(id);
    }
    Ok(ids)
}

async fn search(
    client: &reqwest::Client,
    server: &common::TestServer,
    token: &str,
    query: &str,
) -> Result<Value> {
    let res = client
        .get(format!("{}/api/contacts{}", server.base_url, query))
        .header("Authorization", token)
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "search failed: {}",
        res.status()
    );
    Ok(res.json().await?)
}

#[tokio::test]
async fn unfiltered_search_pages_through_everything() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_user, token) = common::register_and_login(&client, server, "searchall").await?;
    seed_contacts(&client, server, &token).await?;

    let body = search(&client, server, &token, "").await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(10));
    assert_eq!(body["meta"]["total"], 20);
    assert_eq!(body["meta"]["current_page"], 1);
    assert_eq!(body["meta"]["per_page"], 10);
    assert_eq!(body["meta"]["last_page"], 2);
    Ok(())
}

#[tokio::test]
async fn name_filter_matches_both_name_columns_case_insensitively() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_user, token) = common::register_and_login(&client, server, "searchname").await?;
    seed_contacts(&client, server, &token).await?;

    // Substring of every first_name, lowercased to prove case-insensitivity
    let body = search(&client, server, &token, "?name=first").await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(10));
    assert_eq!(body["meta"]["total"], 20);

    // Substring of every last_name
    let body = search(&client, server, &token, "?name=LAST").await?;
    assert_eq!(body["meta"]["total"], 20);

    // "First2" hits First2 and First20 only
    let body = search(&client, server, &token, "?name=First2").await?;
    assert_eq!(body["meta"]["total"], 2);
    Ok(())
}

#[tokio::test]
async fn email_and_phone_filters_match_substrings() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_user, token) = common::register_and_login(&client, server, "searchmail").await?;
    seed_contacts(&client, server, &token).await?;

    let body = search(&client, server, &token, "?email=example.com").await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(10));
    assert_eq!(body["meta"]["total"], 20);

    let body = search(&client, server, &token, "?phone=08").await?;
    assert_eq!(body["meta"]["total"], 20);

    let body = search(&client, server, &token, "?phone=08005").await?;
    assert_eq!(body["meta"]["total"], 1);
    Ok(())
}

#[tokio::test]
async fn combined_filters_narrow_with_and_semantics() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_user, token) = common::register_and_login(&client, server, "searchand").await?;
    seed_contacts(&client, server, &token).await?;

    // name=First2 alone matches two rows; adding the email filter keeps one
    let body = search(&client, server, &token, "?name=First2").await?;
    assert_eq!(body["meta"]["total"], 2);

    let body = search(&client, server, &token, "?name=First2&email=test20").await?;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["first_name"], "First20");
    Ok(())
}

#[tokio::test]
async fn zero_matches_is_a_success_with_empty_page() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_user, token) = common::register_and_login(&client, server, "searchnone").await?;
    seed_contacts(&client, server, &token).await?;

    let body = search(&client, server, &token, "?name=tidakada").await?;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["total"], 0);
    Ok(())
}

#[tokio::test]
async fn pagination_is_deterministic_by_id() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_user, token) = common::register_and_login(&client, server, "searchpage").await?;
    let ids = seed_contacts(&client, server, &token).await?;

    let body = search(&client, server, &token, "?size=5&page=2").await?;
    let items = body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 5);
    assert_eq!(body["meta"]["total"], 20);
    assert_eq!(body["meta"]["current_page"], 2);

    // Results are ordered by id ascending, so page 2 starts at the 6th row
    let returned: Vec<i64> = items.iter().filter_map(|c| c["id"].as_i64()).collect();
    assert_eq!(returned, ids[5..10].to_vec());
    Ok(())
}

#[tokio::test]
async fn search_only_sees_the_callers_contacts() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (_owner, owner_token) = common::register_and_login(&client, server, "mine").await?;
    let (_other, other_token) = common::register_and_login(&client, server, "theirs").await?;
    seed_contacts(&client, server, &owner_token).await?;

    let body = search(&client, server, &other_token, "").await?;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["total"], 0);
    Ok(())
}
