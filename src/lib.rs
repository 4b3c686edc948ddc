pub mod shared {
    pub mod infrastructure {
        pub mod config;
        pub mod database;
        pub mod http {
            pub mod envelope;
            pub mod request_id;
        }
        pub mod pdf;
    }
}

pub mod modules {
    pub mod timesheets {
        pub mod core {
            pub mod calendar;
            pub mod errors;
            pub mod hours;
            pub mod parsing;
            pub mod ports;
            pub mod timesheet;
        }
        pub mod application {
            pub mod service;
        }
        pub mod adapters {
            pub mod inbound {
                pub mod http {
                    pub mod dto;
                    pub mod entries;
                    pub mod error;
                    pub mod export;
                    pub mod health;
                    pub mod timesheets;
                }
            }
            pub mod outbound {
                pub mod in_memory_timesheet_repository;
                pub mod pdf_timesheet_report;
                pub mod postgres_timesheet_repository;
            }
        }
    }
}

pub mod shell;
