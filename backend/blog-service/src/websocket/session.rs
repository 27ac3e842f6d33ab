/// WebSocket session actor for broadcast subscribers
use super::{BroadcastHub, BroadcastMessage, ConnectionId};
use actix::{Actor, ActorContext, AsyncContext, Handler, Message as ActixMessage, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use std::time::{Duration, Instant};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Broadcast event forwarded into the session actor
#[derive(ActixMessage)]
#[rtype(result = "()")]
struct ForwardEvent(String);

struct WsSession {
    connection_id: ConnectionId,
    hub: BroadcastHub,
    hb: Instant,
}

impl WsSession {
    fn new(connection_id: ConnectionId, hub: BroadcastHub) -> Self {
        Self {
            connection_id,
            hub,
            hb: Instant::now(),
        }
    }

    fn hb(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                tracing::warn!(connection_id = %act.connection_id, "websocket heartbeat failed, disconnecting");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::debug!(connection_id = %self.connection_id, "broadcast subscriber connected");
        self.hb(ctx);

        if let Ok(json) = BroadcastMessage::connected(self.connection_id.as_uuid()).to_json() {
            ctx.text(json);
        }
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::debug!(connection_id = %self.connection_id, "broadcast subscriber disconnected");

        let hub = self.hub.clone();
        let connection_id = self.connection_id;
        actix::spawn(async move {
            hub.unsubscribe(connection_id).await;
        });
    }
}

impl Handler<ForwardEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: ForwardEvent, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(_)) => {
                // Broadcast-only channel; inbound text carries no protocol
            }
            Ok(ws::Message::Binary(_)) => {
                tracing::warn!("binary websocket messages not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => {}
        }
    }
}

/// HTTP handler upgrading to the broadcast subscription channel
///
/// Endpoint: GET /ws
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    hub: web::Data<BroadcastHub>,
) -> Result<HttpResponse, Error> {
    let (connection_id, mut rx) = hub.subscribe().await;

    let session = WsSession::new(connection_id, hub.get_ref().clone());
    let (addr, resp) = match ws::WsResponseBuilder::new(session, &req, stream).start_with_addr() {
        Ok(started) => started,
        Err(e) => {
            // Handshake failed before the actor started; drop the registration
            hub.unsubscribe(connection_id).await;
            return Err(e);
        }
    };

    // Bridge the hub's channel into the session actor; the forwarding
    // task ends when either side goes away.
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            match message.to_json() {
                Ok(json) => {
                    if addr.try_send(ForwardEvent(json)).is_err() {
                        break;
                    }
                }
                Err(e) => tracing::error!("broadcast message serialization failed: {}", e),
            }
        }
    });

    Ok(resp)
}
