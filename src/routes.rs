use crate::{
    api::{
        attendance, department, designation, employee, employee_type, holiday, leave_type,
        office_timing, other_salary_component, salary, weekend,
    },
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let protected_limiter = build_limiter(config.rate_protected_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::scope("/employees")
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::get_employees)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/salaries")
                    .service(
                        web::resource("")
                            .route(web::post().to(salary::create_salary))
                            .route(web::get().to(salary::get_salaries)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(salary::update_salary))
                            .route(web::delete().to(salary::delete_salary)),
                    ),
            )
            .service(
                web::scope("/office-timings")
                    .service(
                        web::resource("")
                            .route(web::post().to(office_timing::create_office_timing))
                            .route(web::get().to(office_timing::get_office_timings)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(office_timing::get_office_timing))
                            .route(web::put().to(office_timing::update_office_timing))
                            .route(web::delete().to(office_timing::delete_office_timing)),
                    ),
            )
            .service(
                web::scope("/departments")
                    .service(
                        web::resource("")
                            .route(web::post().to(department::create_department))
                            .route(web::get().to(department::get_departments)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(department::update_department))
                            .route(web::delete().to(department::delete_department)),
                    ),
            )
            .service(
                web::scope("/designations")
                    .service(
                        web::resource("")
                            .route(web::post().to(designation::create_designation))
                            .route(web::get().to(designation::get_designations)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(designation::update_designation))
                            .route(web::delete().to(designation::delete_designation)),
                    ),
            )
            .service(
                web::scope("/employee-types")
                    .service(
                        web::resource("")
                            .route(web::post().to(employee_type::create_employee_type))
                            .route(web::get().to(employee_type::get_employee_types)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee_type::update_employee_type))
                            .route(web::delete().to(employee_type::delete_employee_type)),
                    ),
            )
            .service(
                web::scope("/leave-types")
                    .service(
                        web::resource("")
                            .route(web::post().to(leave_type::create_leave_type))
                            .route(web::get().to(leave_type::get_leave_types)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(leave_type::update_leave_type))
                            .route(web::delete().to(leave_type::delete_leave_type)),
                    ),
            )
            .service(
                web::scope("/holidays")
                    .service(
                        web::resource("")
                            .route(web::post().to(holiday::create_holiday))
                            .route(web::get().to(holiday::get_holidays)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(holiday::update_holiday))
                            .route(web::delete().to(holiday::delete_holiday)),
                    ),
            )
            .service(
                web::scope("/attendances")
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::create_attendance))
                            .route(web::get().to(attendance::get_attendances)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(attendance::update_attendance))
                            .route(web::delete().to(attendance::delete_attendance)),
                    ),
            )
            .service(
                web::scope("/other-salary-components")
                    .service(
                        web::resource("")
                            .route(web::post().to(
                                other_salary_component::create_other_salary_component,
                            ))
                            .route(web::get().to(
                                other_salary_component::get_other_salary_components,
                            )),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(
                                other_salary_component::update_other_salary_component,
                            ))
                            .route(web::delete().to(
                                other_salary_component::delete_other_salary_component,
                            )),
                    ),
            )
            .service(
                web::scope("/weekends")
                    .service(web::resource("").route(web::get().to(weekend::get_weekends))),
            ),
    );
}
