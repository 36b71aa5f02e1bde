//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause
//! the current worker to stop processing new requests. For this reason, any long, non-cpu-bound operation (e.g. I/O,
//! database operations, etc.) should be expressed as futures or asynchronous functions. Async handlers get executed
//! concurrently by worker threads and thus don't block execution.
use actix_web::{get, web, HttpResponse, Responder};
use acme_mirror_engine::traits::{OrderManagement, OrderWithLines, RunManagement, RunWithErrors, WebhookManagement};
use log::*;

use crate::{
    data_objects::{IncomingWebhook, JsonResponse},
    errors::ServerError,
};

/// How many runs the run-list endpoint returns, and how many errors are attached to a run's detail view.
const VISIBILITY_LIMIT: i64 = 20;

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal) => {
        paste::paste! { pub struct [<$name:camel Route>];}
        paste::paste! {
            impl [<$name:camel Route>] {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self { Self }
            }
        }
        paste::paste! {
            impl actix_web::dev::HttpServiceFactory for [<$name:camel Route>] {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name);
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//--------------------------------------------   Ingestion  ---------------------------------------------------
route!(receive_order_webhook => Post "/webhooks/orders" impl WebhookManagement);
/// Accepts an order-change webhook from the commerce platform and persists it with `Pending` status.
///
/// The reconciliation worker picks the event up on its next polling cycle; this handler deliberately does nothing
/// else, so the platform gets its 202 back as fast as possible.
pub async fn receive_order_webhook<B>(
    body: web::Json<IncomingWebhook>,
    db: web::Data<B>,
) -> Result<HttpResponse, ServerError>
where
    B: WebhookManagement,
{
    let incoming = body.into_inner();
    trace!("📨️ Received webhook event [{}] for order {}", incoming.event_id, incoming.external_order_id);
    if incoming.source_system.trim().is_empty() || incoming.external_order_id.trim().is_empty() {
        return Err(ServerError::InvalidRequestBody("sourceSystem and externalOrderId must be provided".to_string()));
    }
    let event = db.insert_webhook(incoming.into()).await?;
    info!("📨️ Webhook event [{}] accepted for order {} (id {})", event.event_id, event.external_order_id, event.id);
    Ok(HttpResponse::Accepted().json(JsonResponse::success(format!("Webhook event {} accepted", event.id))))
}

//--------------------------------------------   Visibility  --------------------------------------------------
route!(order_by_number => Get "/api/orders/{order_number}" impl OrderManagement);
/// A mirrored order, including its line items, looked up by order number.
pub async fn order_by_number<B>(path: web::Path<String>, db: web::Data<B>) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement,
{
    let order_number = path.into_inner();
    trace!("💻️ Fetching order {order_number}");
    let Some(order) = db.fetch_order_by_order_number(&order_number).await? else {
        return Err(ServerError::NoRecordFound(format!("No order with number {order_number}")));
    };
    let lines = db.fetch_order_lines(order.id).await?;
    Ok(HttpResponse::Ok().json(OrderWithLines { order, lines }))
}

route!(import_runs => Get "/api/import-runs" impl RunManagement);
/// The most recent reconciliation runs, newest first.
pub async fn import_runs<B>(db: web::Data<B>) -> Result<HttpResponse, ServerError>
where
    B: RunManagement,
{
    let runs = db.fetch_recent_runs(VISIBILITY_LIMIT).await?;
    Ok(HttpResponse::Ok().json(runs))
}

route!(import_run_details => Get "/api/import-runs/{id}" impl RunManagement);
/// One reconciliation run together with the errors recorded in it.
pub async fn import_run_details<B>(path: web::Path<i64>, db: web::Data<B>) -> Result<HttpResponse, ServerError>
where
    B: RunManagement,
{
    let run_id = path.into_inner();
    let Some(run) = db.fetch_run(run_id).await? else {
        return Err(ServerError::NoRecordFound(format!("No processing run with id {run_id}")));
    };
    let errors = db.fetch_errors_for_run(run_id, VISIBILITY_LIMIT).await?;
    Ok(HttpResponse::Ok().json(RunWithErrors { run, errors }))
}
