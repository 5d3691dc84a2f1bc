use super::registry::{DefaultValue, FieldDefinition, FieldType, ModelDefinition};

use super::registry::FieldType::{Boolean, Date, Float, Integer, StringList};

const TEXT: FieldType = FieldType::String;

pub(crate) fn standard_model_definitions() -> Vec<ModelDefinition> {
    vec![
        employee(),
        job(),
        applicant(),
        leave_request(),
        attendance(),
        payroll(),
        performance_review(),
        announcement(),
    ]
}

fn employee() -> ModelDefinition {
    ModelDefinition {
        name: "Employee",
        description: "Employees collection schema",
        fields: vec![
            FieldDefinition::required("first_name", TEXT, "First name"),
            FieldDefinition::required("last_name", TEXT, "Last name"),
            FieldDefinition::required("email", TEXT, "Work email address"),
            FieldDefinition::optional("phone", TEXT, "Phone number"),
            FieldDefinition::optional("position", TEXT, "Job title/position"),
            FieldDefinition::optional("department", TEXT, "Department name"),
            FieldDefinition::optional("start_date", Date, "Start date"),
            FieldDefinition::optional(
                "employment_type",
                TEXT,
                "Employment type: full-time, part-time, contract",
            )
            .with_default(DefaultValue::Text("full-time")),
            FieldDefinition::optional("manager_id", TEXT, "Manager employee ID (string)"),
            FieldDefinition::optional("location", TEXT, "Office or remote location"),
            FieldDefinition::required("is_active", Boolean, "Active employment status")
                .with_default(DefaultValue::Boolean(true)),
        ],
    }
}

fn job() -> ModelDefinition {
    ModelDefinition {
        name: "Job",
        description: "Jobs collection schema",
        fields: vec![
            FieldDefinition::required("title", TEXT, "Job title"),
            FieldDefinition::optional("department", TEXT, "Department"),
            FieldDefinition::optional("description", TEXT, "Job description"),
            FieldDefinition::optional("location", TEXT, "Location"),
            FieldDefinition::optional("employment_type", TEXT, "Employment type")
                .with_default(DefaultValue::Text("full-time")),
            FieldDefinition::optional("salary_min", Float, "Minimum salary").minimum(0.0),
            FieldDefinition::optional("salary_max", Float, "Maximum salary").minimum(0.0),
            FieldDefinition::optional("skills", StringList, "Key skills")
                .with_default(DefaultValue::EmptyList),
            FieldDefinition::required("is_open", Boolean, "Whether the job is open")
                .with_default(DefaultValue::Boolean(true)),
        ],
    }
}

fn applicant() -> ModelDefinition {
    ModelDefinition {
        name: "Applicant",
        description: "Applicants collection schema",
        fields: vec![
            FieldDefinition::required("name", TEXT, "Applicant name"),
            FieldDefinition::required("email", TEXT, "Applicant email"),
            FieldDefinition::optional("phone", TEXT, "Applicant phone"),
            FieldDefinition::optional("job_id", TEXT, "Applied job ID (string)"),
            FieldDefinition::optional("resume_url", TEXT, "Link to resume/CV"),
            FieldDefinition::optional("cover_letter", TEXT, "Cover letter text"),
            FieldDefinition::required("status", TEXT, "Application status")
                .with_default(DefaultValue::Text("applied")),
        ],
    }
}

fn leave_request() -> ModelDefinition {
    ModelDefinition {
        name: "LeaveRequest",
        description: "Leave requests collection schema",
        fields: vec![
            FieldDefinition::required("employee_id", TEXT, "Employee ID (string)"),
            FieldDefinition::required("leave_type", TEXT, "Type of leave: vacation, sick, etc."),
            FieldDefinition::required("start_date", Date, "Start date"),
            FieldDefinition::required("end_date", Date, "End date"),
            FieldDefinition::optional("reason", TEXT, "Reason for leave"),
            FieldDefinition::required("status", TEXT, "Approval status")
                .with_default(DefaultValue::Text("pending")),
        ],
    }
}

fn attendance() -> ModelDefinition {
    ModelDefinition {
        name: "Attendance",
        description: "Attendance collection schema",
        fields: vec![
            FieldDefinition::required("employee_id", TEXT, "Employee ID (string)"),
            FieldDefinition::required("date", Date, "Attendance date"),
            FieldDefinition::optional("check_in", TEXT, "Check-in time (HH:MM)"),
            FieldDefinition::optional("check_out", TEXT, "Check-out time (HH:MM)"),
            FieldDefinition::optional("notes", TEXT, "Notes"),
        ],
    }
}

fn payroll() -> ModelDefinition {
    ModelDefinition {
        name: "Payroll",
        description: "Payroll collection schema",
        fields: vec![
            FieldDefinition::required("employee_id", TEXT, "Employee ID (string)"),
            FieldDefinition::required("period_start", Date, "Payroll period start date"),
            FieldDefinition::required("period_end", Date, "Payroll period end date"),
            FieldDefinition::required("base_pay", Float, "Base pay amount").minimum(0.0),
            FieldDefinition::required("bonus", Float, "Bonus amount")
                .with_default(DefaultValue::Integer(0))
                .minimum(0.0),
            FieldDefinition::required("deductions", Float, "Deductions amount")
                .with_default(DefaultValue::Integer(0))
                .minimum(0.0),
            FieldDefinition::optional(
                "net_pay",
                Float,
                "Net pay (calculated if not provided)",
            )
            .minimum(0.0),
        ],
    }
}

fn performance_review() -> ModelDefinition {
    ModelDefinition {
        name: "PerformanceReview",
        description: "Performance reviews collection schema",
        fields: vec![
            FieldDefinition::required("employee_id", TEXT, "Employee ID (string)"),
            FieldDefinition::optional("reviewer_id", TEXT, "Reviewer employee ID"),
            FieldDefinition::required("review_date", Date, "Date of review"),
            FieldDefinition::required("rating", Integer, "Overall rating 1-5")
                .minimum(1.0)
                .maximum(5.0),
            FieldDefinition::optional("strengths", StringList, "Strengths")
                .with_default(DefaultValue::EmptyList),
            FieldDefinition::optional("improvements", StringList, "Areas for improvement")
                .with_default(DefaultValue::EmptyList),
            FieldDefinition::optional("comments", TEXT, "Additional comments"),
        ],
    }
}

fn announcement() -> ModelDefinition {
    ModelDefinition {
        name: "Announcement",
        description: "Announcements collection schema",
        fields: vec![
            FieldDefinition::required("title", TEXT, "Announcement title"),
            FieldDefinition::required("body", TEXT, "Announcement content"),
            FieldDefinition::optional("audience", TEXT, "Target audience")
                .with_default(DefaultValue::Text("all")),
            FieldDefinition::optional("priority", TEXT, "Priority: low, normal, high")
                .with_default(DefaultValue::Text("normal")),
        ],
    }
}
