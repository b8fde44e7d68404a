use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::errors::ApiError;
use crate::services::MqttBroker;

#[derive(Clone)]
pub struct MqttState {
    pub broker: Arc<dyn MqttBroker>,
}

#[derive(Debug, Deserialize)]
pub struct TopicQuery {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct PublishQuery {
    pub topic: String,
    pub message: String,
}

pub async fn publish_message(
    State(state): State<MqttState>,
    Query(query): Query<PublishQuery>,
) -> Result<impl IntoResponse, ApiError> {
    state.broker.publish(&query.topic, &query.message).await?;

    Ok(format!("published to topic: {}", query.topic))
}

pub async fn subscribe_topic(
    State(state): State<MqttState>,
    Query(query): Query<TopicQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let added = state.broker.subscribe(&query.topic).await?;

    if added {
        Ok(format!("subscribed to topic: {}", query.topic))
    } else {
        Ok(format!("already subscribed to topic: {}", query.topic))
    }
}

pub async fn unsubscribe_topic(
    State(state): State<MqttState>,
    Query(query): Query<TopicQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state.broker.unsubscribe(&query.topic).await?;

    if removed {
        Ok(format!("unsubscribed from topic: {}", query.topic))
    } else {
        Ok(format!("not subscribed to topic: {}", query.topic))
    }
}

pub async fn get_subscriptions(State(state): State<MqttState>) -> impl IntoResponse {
    Json(state.broker.subscriptions())
}
