//! When steps for task HTTP behaviour scenarios.

use super::world::TaskApiWorld;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use serde_json::{Value, json};

fn json_request(method: Method, uri: &str, payload: &Value) -> eyre::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload)?))?)
}

fn create(world: &mut TaskApiWorld, payload: &Value) -> eyre::Result<()> {
    world
        .send(json_request(Method::POST, "/tasks", payload)?)
        .wrap_err("create task in scenario")?;
    if world.last_status == Some(StatusCode::CREATED) {
        world.task_id = world
            .last_body
            .get("id")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
    }
    Ok(())
}

#[when(r#"a task titled "{title}" due in {hours:i64} hours is created"#)]
fn create_due_in_future(
    world: &mut TaskApiWorld,
    title: String,
    hours: i64,
) -> Result<(), eyre::Report> {
    let due = (Utc::now() + Duration::hours(hours)).to_rfc3339();
    create(world, &json!({"title": title, "dueDate": due}))
}

#[when(r#"a task titled "{title}" due {minutes:i64} minutes ago is created"#)]
fn create_due_in_past(
    world: &mut TaskApiWorld,
    title: String,
    minutes: i64,
) -> Result<(), eyre::Report> {
    let due = (Utc::now() - Duration::minutes(minutes)).to_rfc3339();
    create(world, &json!({"title": title, "dueDate": due}))
}

#[when("a task with a blank title is created")]
fn create_blank_title(world: &mut TaskApiWorld) -> Result<(), eyre::Report> {
    create(world, &json!({"title": ""}))
}

#[when(r#"the task is updated to "{title}" due in {hours:i64} hours"#)]
fn update_task(world: &mut TaskApiWorld, title: String, hours: i64) -> Result<(), eyre::Report> {
    let uri = format!("/tasks/{}", world.task_id()?);
    let due = (Utc::now() + Duration::hours(hours)).to_rfc3339();
    world
        .send(json_request(
            Method::PUT,
            &uri,
            &json!({"title": title, "dueDate": due}),
        )?)
        .wrap_err("update task in scenario")
}

#[when("the task is deleted")]
fn delete_task(world: &mut TaskApiWorld) -> Result<(), eyre::Report> {
    let uri = format!("/tasks/{}", world.task_id()?);
    world
        .send(Request::delete(uri).body(Body::empty())?)
        .wrap_err("delete task in scenario")
}

#[when("the task is fetched")]
fn fetch_task(world: &mut TaskApiWorld) -> Result<(), eyre::Report> {
    let uri = format!("/tasks/{}", world.task_id()?);
    world
        .send(Request::get(uri).body(Body::empty())?)
        .wrap_err("fetch task in scenario")
}
