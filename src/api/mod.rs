use rocket::Route;

mod admin;
mod polls;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(polls::routes());
    routes.extend(admin::routes());
    routes
}
