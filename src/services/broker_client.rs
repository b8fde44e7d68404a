use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::errors::BrokerError;
use crate::services::message_router::MessageRouter;
use crate::services::topic_registry::TopicRegistry;

/// Topics every instance subscribes right after connecting.
pub const BOOTSTRAP_TOPICS: [&str; 2] = ["sensor/data", "device/status"];

const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Messaging boundary used by handlers and services. The production
/// implementation speaks MQTT through [`BrokerClient`]; tests swap in a
/// recording mock.
///
/// Delivery is at-least-once: consumers must tolerate duplicates, and a
/// failed publish surfaces to the caller instead of being retried here.
#[async_trait]
pub trait MqttBroker: Send + Sync {
    async fn publish(&self, topic: &str, payload: &str) -> Result<(), BrokerError>;

    /// Returns `true` when the topic was newly subscribed.
    async fn subscribe(&self, topic: &str) -> Result<bool, BrokerError>;

    /// Returns `true` when the topic was subscribed before the call.
    async fn unsubscribe(&self, topic: &str) -> Result<bool, BrokerError>;

    fn subscriptions(&self) -> Vec<String>;
}

/// Single long-lived MQTT connection shared by every caller.
///
/// Inbound publishes hop from the transport poll loop onto a bounded channel
/// before they reach the [`MessageRouter`], so a slow database write can
/// never stall the broker connection.
pub struct BrokerClient {
    client: AsyncClient,
    registry: Arc<TopicRegistry>,
}

impl BrokerClient {
    /// Connect, wait for the broker acknowledgment, then spawn the transport
    /// poll loop and the routing task and subscribe the bootstrap topics.
    ///
    /// Failing to reach the broker within `connect_timeout` is fatal to the
    /// caller: no telemetry or control path works without the connection.
    pub async fn connect(
        broker: &crate::configs::settings::Broker,
        registry: Arc<TopicRegistry>,
        router: Arc<MessageRouter>,
    ) -> Result<Self, BrokerError> {
        let mut options = MqttOptions::new(&broker.client_id, &broker.host, broker.port);
        options.set_keep_alive(Duration::from_secs(5));
        options.set_clean_session(true);

        let (client, mut event_loop) = AsyncClient::new(options, 10);

        timeout(
            Duration::from_secs(broker.connect_timeout),
            Self::wait_for_ack(&mut event_loop),
        )
        .await
        .map_err(|_| BrokerError::ConnectTimeout)??;

        tracing::info!("connected to broker at {}:{}", broker.host, broker.port);

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        tokio::spawn(Self::poll_transport(event_loop, tx));
        tokio::spawn(Self::route_messages(router, rx));

        let connected = Self { client, registry };

        for topic in BOOTSTRAP_TOPICS {
            connected.subscribe(topic).await?;
        }

        Ok(connected)
    }

    async fn wait_for_ack(event_loop: &mut EventLoop) -> Result<(), BrokerError> {
        loop {
            if let Event::Incoming(Packet::ConnAck(_)) = event_loop.poll().await? {
                return Ok(());
            }
        }
    }

    /// Drives the rumqttc event loop forever. Connection errors are logged
    /// and polling resumes after a short pause; rumqttc reconnects on the
    /// next poll. Lost subscriptions are not replayed.
    async fn poll_transport(mut event_loop: EventLoop, tx: mpsc::Sender<(String, Vec<u8>)>) {
        loop {
            match event_loop.poll().await {
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    let message = (publish.topic.clone(), publish.payload.to_vec());

                    // Backpressure: drop rather than stall the poll loop.
                    if tx.try_send(message).is_err() {
                        tracing::warn!("routing queue full, dropping message on {}", publish.topic);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("broker connection lost: {}", e);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }

    /// Consumes queued messages one at a time. A failed message is logged
    /// and dropped; the loop itself never dies on bad input.
    async fn route_messages(router: Arc<MessageRouter>, mut rx: mpsc::Receiver<(String, Vec<u8>)>) {
        while let Some((topic, payload)) = rx.recv().await {
            if let Err(e) = router.route(&topic, &payload).await {
                tracing::warn!("discarding message on {}: {}", topic, e);
            }
        }
    }
}

#[async_trait]
impl MqttBroker for BrokerClient {
    async fn publish(&self, topic: &str, payload: &str) -> Result<(), BrokerError> {
        self.client
            .publish(topic, QoS::AtLeastOnce, false, payload.to_owned())
            .await?;

        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<bool, BrokerError> {
        if self.registry.contains(topic) {
            return Ok(false);
        }

        // Registry joins only after the broker accepted the subscription.
        self.client.subscribe(topic, QoS::AtLeastOnce).await?;

        Ok(self.registry.add(topic))
    }

    async fn unsubscribe(&self, topic: &str) -> Result<bool, BrokerError> {
        if !self.registry.contains(topic) {
            return Ok(false);
        }

        self.client.unsubscribe(topic).await?;

        Ok(self.registry.remove(topic))
    }

    fn subscriptions(&self) -> Vec<String> {
        self.registry.list()
    }
}
