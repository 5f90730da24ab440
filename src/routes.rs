use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::Role;
use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::handlers::protected::{account, admin, cart, category, course, wishlist};
use crate::handlers::public::{auth, catalog, system};
use crate::middleware::{extract_session, require_auth, require_role, AllowedRoles};
use crate::state::AppState;

const STUDENT: &[Role] = &[Role::Student];
const STAFF: &[Role] = &[Role::Teacher, Role::Admin];
const ADMIN: &[Role] = &[Role::Admin];

/// Who may reach an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Roles(&'static [Role]),
}

/// One row of the routing table.
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    pub access: Access,
    handler: MethodRouter<AppState>,
}

impl Endpoint {
    fn new(method: Method, path: &'static str, access: Access, handler: MethodRouter<AppState>) -> Self {
        Self {
            method,
            path,
            access,
            handler,
        }
    }
}

/// Every route the API serves, with its access level.
pub fn endpoints() -> Vec<Endpoint> {
    use Access::*;

    vec![
        Endpoint::new(Method::GET, "/ping", Public, get(system::ping)),
        Endpoint::new(Method::GET, "/health", Public, get(system::health)),
        // Accounts
        Endpoint::new(Method::POST, "/user/register", Public, post(auth::register)),
        Endpoint::new(Method::POST, "/user/sign-in", Public, post(auth::sign_in)),
        Endpoint::new(Method::POST, "/user/sign-out", Public, post(auth::sign_out)),
        Endpoint::new(Method::GET, "/user/list-teacher", Public, get(auth::list_teacher)),
        Endpoint::new(Method::GET, "/user/user-info", Authenticated, get(account::user_info)),
        Endpoint::new(Method::PUT, "/user/profile", Authenticated, put(account::update_profile)),
        Endpoint::new(Method::GET, "/auth/get-user-info", Authenticated, get(account::get_user_info)),
        // Catalog
        Endpoint::new(Method::GET, "/public/category", Public, get(catalog::list_categories)),
        Endpoint::new(Method::GET, "/public/category/:id", Public, get(catalog::get_category)),
        Endpoint::new(Method::POST, "/category/create-category", Roles(STAFF), post(category::create_category)),
        Endpoint::new(Method::PUT, "/category/update-category/:id", Roles(STAFF), put(category::update_category)),
        Endpoint::new(Method::DELETE, "/category/delete-category/:id", Roles(STAFF), delete(category::delete_category)),
        Endpoint::new(Method::GET, "/public/getall-course", Public, get(catalog::list_courses)),
        Endpoint::new(Method::GET, "/public/get-course/:course_id", Public, get(catalog::get_course)),
        Endpoint::new(Method::GET, "/public/get-category/:category_id", Public, get(catalog::courses_by_category)),
        Endpoint::new(Method::POST, "/teacher/create-course", Roles(STAFF), post(course::create_course)),
        Endpoint::new(Method::PUT, "/teacher/update-course/:id", Roles(STAFF), put(course::update_course)),
        Endpoint::new(Method::DELETE, "/teacher/delete-course/:id", Roles(STAFF), delete(course::delete_course)),
        // Student shopping
        Endpoint::new(Method::POST, "/cart/create-cart", Roles(STUDENT), post(cart::create_cart)),
        Endpoint::new(Method::GET, "/cart/cartpage", Roles(STUDENT), get(cart::cart_page)),
        Endpoint::new(Method::DELETE, "/cart/delete-cart/:course_id", Roles(STUDENT), delete(cart::delete_cart)),
        Endpoint::new(Method::POST, "/wishlist/create-wishlist", Roles(STUDENT), post(wishlist::create_wishlist)),
        Endpoint::new(Method::GET, "/wishlist/wishlist", Roles(STUDENT), get(wishlist::wishlist)),
        Endpoint::new(Method::DELETE, "/wishlist/delete-wishlist/:course_id", Roles(STUDENT), delete(wishlist::delete_wishlist)),
        // Administration
        Endpoint::new(Method::GET, "/admin/all-user", Roles(ADMIN), get(admin::all_users)),
        Endpoint::new(Method::GET, "/admin/list-teacher", Roles(ADMIN), get(admin::list_teachers)),
        Endpoint::new(Method::GET, "/admin/list-student", Roles(ADMIN), get(admin::list_students)),
    ]
}

/// Wrap one endpoint in the guards its access level demands.
///
/// The role guard is only ever installed together with, and inside of,
/// the authentication guard.
fn guard(endpoint: Endpoint) -> Router<AppState> {
    let router = Router::new().route(endpoint.path, endpoint.handler);

    match endpoint.access {
        Access::Public => router,
        Access::Authenticated => router.route_layer(from_fn(require_auth)),
        Access::Roles(roles) => router
            .route_layer(from_fn_with_state(AllowedRoles(roles), require_role))
            .route_layer(from_fn(require_auth)),
    }
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let router = endpoints()
        .into_iter()
        .fold(Router::new(), |router, endpoint| router.merge(guard(endpoint)));

    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.security))
                .layer(from_fn_with_state(state.clone(), extract_session)),
        )
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Credentialed CORS for the configured origins only.
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
