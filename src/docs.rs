use crate::api::attendance::AttendancePayload;
use crate::model::attendance::EmployeeAttendance;
use crate::model::department::Department;
use crate::model::designation::Designation;
use crate::model::employee::{BloodGroup, Employee, Gender};
use crate::model::employee_type::EmployeeType;
use crate::model::holiday::Holiday;
use crate::model::leave_type::LeaveType;
use crate::model::office_timing::OfficeTiming;
use crate::model::other_salary_component::OtherSalaryComponent;
use crate::model::salary::{EmployeeOtherSalaryComponent, Salary};
use crate::model::weekend::{WeekDay, Weekend};
use crate::service::attendance::NewAttendance;
use crate::service::department::DepartmentData;
use crate::service::designation::DesignationData;
use crate::service::employee::NewEmployee;
use crate::service::employee_type::EmployeeTypeData;
use crate::service::holiday::NewHoliday;
use crate::service::leave_type::LeaveTypeData;
use crate::service::office_timing::OfficeTimingData;
use crate::service::other_salary_component::OtherSalaryComponentData;
use crate::service::salary::{CreateSalaryPayload, NewSalary, NewSalaryComponent, UpdateSalaryPayload};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Admin API",
        version = "1.0.0",
        description = r#"
## HR Administration Backend

Administrative backend for employee records, monthly salaries, office
timings, attendance, holidays and the lookup catalogs behind them.

### Key Features
- **Employee Management** — profiles with department/designation/type lookups
  and per-employee leave type entitlements
- **Salary Management** — monthly salary rows with ad hoc bonus/deduction
  components, written and replaced atomically
- **Office Timings** — working hours with their weekly off-day sets
- **Attendance** — single or batch daily records with duplicate detection
- **Catalogs** — departments, designations, employee types, leave types,
  holidays and salary components

### Security
All endpoints require **JWT Bearer authentication**; each operation is
additionally gated by a named permission carried in the token.

Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::get_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::salary::create_salary,
        crate::api::salary::get_salaries,
        crate::api::salary::update_salary,
        crate::api::salary::delete_salary,

        crate::api::office_timing::create_office_timing,
        crate::api::office_timing::get_office_timings,
        crate::api::office_timing::get_office_timing,
        crate::api::office_timing::update_office_timing,
        crate::api::office_timing::delete_office_timing,

        crate::api::department::create_department,
        crate::api::department::get_departments,
        crate::api::department::update_department,
        crate::api::department::delete_department,

        crate::api::designation::create_designation,
        crate::api::designation::get_designations,
        crate::api::designation::update_designation,
        crate::api::designation::delete_designation,

        crate::api::employee_type::create_employee_type,
        crate::api::employee_type::get_employee_types,
        crate::api::employee_type::update_employee_type,
        crate::api::employee_type::delete_employee_type,

        crate::api::leave_type::create_leave_type,
        crate::api::leave_type::get_leave_types,
        crate::api::leave_type::update_leave_type,
        crate::api::leave_type::delete_leave_type,

        crate::api::holiday::create_holiday,
        crate::api::holiday::get_holidays,
        crate::api::holiday::update_holiday,
        crate::api::holiday::delete_holiday,

        crate::api::attendance::create_attendance,
        crate::api::attendance::get_attendances,
        crate::api::attendance::update_attendance,
        crate::api::attendance::delete_attendance,

        crate::api::other_salary_component::create_other_salary_component,
        crate::api::other_salary_component::get_other_salary_components,
        crate::api::other_salary_component::update_other_salary_component,
        crate::api::other_salary_component::delete_other_salary_component,

        crate::api::weekend::get_weekends
    ),
    components(
        schemas(
            Employee,
            Gender,
            BloodGroup,
            NewEmployee,
            Department,
            DepartmentData,
            Designation,
            DesignationData,
            EmployeeType,
            EmployeeTypeData,
            LeaveType,
            LeaveTypeData,
            Holiday,
            NewHoliday,
            EmployeeAttendance,
            NewAttendance,
            AttendancePayload,
            OfficeTiming,
            OfficeTimingData,
            Weekend,
            WeekDay,
            Salary,
            NewSalary,
            NewSalaryComponent,
            CreateSalaryPayload,
            UpdateSalaryPayload,
            EmployeeOtherSalaryComponent,
            OtherSalaryComponent,
            OtherSalaryComponentData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Salary", description = "Salary and component APIs"),
        (name = "OfficeTiming", description = "Office timing APIs"),
        (name = "Department", description = "Department catalog APIs"),
        (name = "Designation", description = "Designation catalog APIs"),
        (name = "EmployeeType", description = "Employee type catalog APIs"),
        (name = "LeaveType", description = "Leave type catalog APIs"),
        (name = "Holiday", description = "Holiday calendar APIs"),
        (name = "Attendance", description = "Attendance APIs"),
        (name = "OtherSalaryComponent", description = "Salary component catalog APIs"),
        (name = "Weekend", description = "Weekend lookup APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
