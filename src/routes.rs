use crate::{
    api::{
        attendance, employee,
        shared::{json_config, path_config},
    },
    store::Store,
};
use actix_web::web;

/// Mounts both resources under `api_prefix`. Paths are registered without a
/// trailing slash; `NormalizePath::trim` makes `/employees/` match as well.
pub fn configure<S: Store>(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    cfg.service(
        web::scope(api_prefix)
            .app_data(json_config())
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees::<S>))
                            .route(web::post().to(employee::create_employee::<S>)),
                    )
                    // /employees/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(employee::get_employee::<S>))
                            .route(web::put().to(employee::put_employee::<S>))
                            .route(web::patch().to(employee::patch_employee::<S>))
                            .route(web::delete().to(employee::delete_employee::<S>)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    .app_data(path_config("Attendance record"))
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendance::<S>))
                            .route(web::post().to(attendance::create_attendance::<S>)),
                    )
                    // /attendance/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(attendance::get_attendance::<S>))
                            .route(web::put().to(attendance::put_attendance::<S>))
                            .route(web::patch().to(attendance::patch_attendance::<S>))
                            .route(web::delete().to(attendance::delete_attendance::<S>)),
                    ),
            ),
    );
}
