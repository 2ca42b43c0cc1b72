pub mod attendance;
pub mod department;
pub mod designation;
pub mod employee;
pub mod employee_type;
pub mod holiday;
pub mod leave_type;
pub mod office_timing;
pub mod other_salary_component;
pub mod salary;
pub mod weekend;
