mod attendees;
mod events;
mod patients;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    events::config(cfg);
    attendees::config(cfg);
    patients::config(cfg);
}
