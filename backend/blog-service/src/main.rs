use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use blog_service::handlers;
use blog_service::middleware::JwtAuthMiddleware;
use blog_service::openapi::ApiDoc;
use blog_service::storage::{DiskFileStore, FileStore};
use blog_service::websocket::{ws_connect, BroadcastHub};
use db_pool::{create_pool as create_pg_pool, DbConfig as DbPoolConfig};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match blog_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Token signing configuration is immutable after this point
    crypto_core::jwt::initialize_jwt(
        &config.jwt.secret,
        &config.jwt.issuer,
        &config.jwt.audience,
        config.jwt.lifetime_minutes,
    )
    .map_err(|err| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to initialize JWT settings: {err}"),
        )
    })?;

    // Database connection pool + embedded migrations
    let mut db_cfg = DbPoolConfig::from_env().unwrap_or_default();
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
    }
    if db_cfg.max_connections < config.database.max_connections {
        db_cfg.max_connections = config.database.max_connections;
    }
    db_cfg.log_config();

    let db_pool = match create_pg_pool(db_cfg).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    blog_service::db::MIGRATOR.run(&db_pool).await.map_err(|e| {
        io::Error::new(io::ErrorKind::Other, format!("Migrations failed: {e}"))
    })?;
    tracing::info!("Database migrations applied");

    // Shared broadcast hub for the notification side channel
    let hub = BroadcastHub::new();
    let hub_data = web::Data::new(hub);

    // File-store collaborator for media uploads
    let file_store: Arc<dyn FileStore> = Arc::new(DiskFileStore::new(&config.media.upload_dir));
    let file_store_data = web::Data::new(file_store);

    let config_data = web::Data::new(config.clone());

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(hub_data.clone())
            .app_data(file_store_data.clone())
            .app_data(config_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api/openapi.json", openapi_doc.clone()),
            )
            .route("/api/health", web::get().to(handlers::health_summary))
            // Public auth endpoints
            .service(
                web::scope("/api/auth")
                    .route("/register", web::post().to(handlers::register))
                    .route("/login", web::post().to(handlers::login)),
            )
            // Broadcast subscription channel
            .route("/ws", web::get().to(ws_connect))
            // Bearer-protected resource endpoints
            .service(
                web::scope("/api")
                    .wrap(JwtAuthMiddleware)
                    .service(
                        web::scope("/posts")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::create_post))
                                    .route(web::get().to(handlers::list_posts)),
                            )
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(handlers::get_post))
                                    .route(web::put().to(handlers::update_post))
                                    .route(web::delete().to(handlers::delete_post)),
                            ),
                    )
                    .service(
                        web::scope("/categories")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::create_category))
                                    .route(web::get().to(handlers::list_categories)),
                            )
                            .service(
                                web::resource("/{category_id}")
                                    .route(web::get().to(handlers::get_category))
                                    .route(web::delete().to(handlers::delete_category)),
                            ),
                    )
                    .service(
                        web::scope("/tags")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::create_tag))
                                    .route(web::get().to(handlers::list_tags)),
                            )
                            .service(
                                web::resource("/{tag_id}")
                                    .route(web::delete().to(handlers::delete_tag)),
                            ),
                    )
                    .service(
                        web::scope("/comments")
                            .service(
                                web::resource("/post/{post_id}")
                                    .route(web::get().to(handlers::list_comments_by_post))
                                    .route(web::post().to(handlers::create_comment)),
                            )
                            .service(
                                web::resource("/{comment_id}")
                                    .route(web::get().to(handlers::get_comment))
                                    .route(web::put().to(handlers::update_comment))
                                    .route(web::delete().to(handlers::delete_comment)),
                            ),
                    )
                    .service(web::scope("/likes").service(
                        web::resource("/{post_id}/like")
                            .route(web::post().to(handlers::like_post))
                            .route(web::delete().to(handlers::unlike_post)),
                    ))
                    .service(
                        web::scope("/media")
                            .route("/{post_id}/media", web::post().to(handlers::upload_media)),
                    )
                    .service(
                        web::scope("/notifications")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_notifications)),
                            )
                            .route(
                                "/{notification_id}/read",
                                web::put().to(handlers::mark_notification_read),
                            ),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await?;

    tracing::info!("blog-service shutting down");
    Ok(())
}
