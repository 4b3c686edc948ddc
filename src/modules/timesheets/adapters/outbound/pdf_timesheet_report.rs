// Printable monthly timesheet (A4 portrait) rendered from a loaded aggregate.
//
// Layout
// - Title, then the employee header block.
// - One bordered row per entry, header repeated on every page. Remarks wrap
//   and the row grows to hold them.
// - A bold TOTAL row summing hours and overtime.

use crate::modules::timesheets::core::calendar::{day_name, month_name};
use crate::modules::timesheets::core::timesheet::{Timesheet, TimesheetEntry};
use crate::shared::infrastructure::pdf::{
    A4_HEIGHT, Align, CELL_PADDING, MM, PdfCanvas, Weight, text_block_height, wrap_to_width,
};

const TITLE: &str = "ABSENSI KEHADIRAN / TIME SHEET";
const MARGIN_LEFT: f32 = 10.0 * MM;
const MARGIN_TOP: f32 = 12.0 * MM;
const MARGIN_BOTTOM: f32 = 10.0 * MM;
const ROW_HEIGHT: f32 = 8.0 * MM;
const INFO_ROW_HEIGHT: f32 = 6.0 * MM;
const LABEL_WIDTH: f32 = 55.0 * MM;
const COLON_WIDTH: f32 = 5.0 * MM;
const MISSING: &str = "-";
const HEADER_SIZE: f32 = 8.0;
const BODY_SIZE: f32 = 9.0;

// Column titles and widths in millimetres.
const COLUMNS: [(&str, f32); 7] = [
    ("Tanggal / Date", 25.0),
    ("Hari / Day", 22.0),
    ("Mulai / Start", 22.0),
    ("Selesai / End", 22.0),
    ("Jam / Hrs", 20.0),
    ("Lembur / OT", 22.0),
    ("Keterangan / Remarks", 57.0),
];

pub fn content_disposition(timesheet: &Timesheet) -> String {
    format!(
        "inline; filename=timesheet_{}_{:02}_{}.pdf",
        timesheet.year, timesheet.month, timesheet.id
    )
}

/// Renders the timesheet and its entries, in the order given, to PDF bytes.
pub fn render(timesheet: &Timesheet) -> Vec<u8> {
    let mut report = Report::new();
    report.title();
    report.info_row("Nama Karyawan / Employee Name", &timesheet.employee_name);
    report.info_row("Divisi / Department", &timesheet.department);
    report.info_row(
        "Periode",
        &format!("{} {}", month_name(timesheet.month), timesheet.year),
    );
    if let Some(days) = timesheet.total_working_days {
        report.info_row("Total Hari Kerja / Total Working Day", &format!("{days} Hari"));
    }
    report.top -= 2.0 * MM;
    report.table_header();

    let mut total_hours = 0.0;
    let mut overtime_hours = 0.0;
    for entry in &timesheet.entries {
        total_hours += entry.total_hours.unwrap_or_default();
        overtime_hours += entry.overtime_hours.unwrap_or_default();
        report.entry_row(entry);
    }
    report.total_row(total_hours, overtime_hours);
    report.canvas.finish()
}

struct Report {
    canvas: PdfCanvas,
    top: f32,
}

impl Report {
    fn new() -> Self {
        Self {
            canvas: PdfCanvas::new(),
            top: A4_HEIGHT - MARGIN_TOP,
        }
    }

    fn title(&mut self) {
        let size = 16.0;
        self.canvas
            .text(MARGIN_LEFT, self.top - size, size, Weight::Bold, TITLE);
        self.top -= 10.0 * MM;
    }

    fn info_row(&mut self, label: &str, value: &str) {
        let size = 11.0;
        let baseline = self.top - INFO_ROW_HEIGHT / 2.0 - size * 0.35;
        self.canvas
            .text(MARGIN_LEFT, baseline, size, Weight::Regular, label);
        self.canvas
            .text(MARGIN_LEFT + LABEL_WIDTH, baseline, size, Weight::Regular, ":");
        self.canvas.text(
            MARGIN_LEFT + LABEL_WIDTH + COLON_WIDTH,
            baseline,
            size,
            Weight::Regular,
            value,
        );
        self.top -= INFO_ROW_HEIGHT;
    }

    fn table_header(&mut self) {
        let [date, day, start, end, hours, overtime, remarks] = COLUMNS.map(|(title, _)| title);
        let cells = [date, day, start, end, hours, overtime].map(str::to_string);
        self.row(cells, &[remarks.to_string()], ROW_HEIGHT, HEADER_SIZE, Weight::Bold);
    }

    fn entry_row(&mut self, entry: &TimesheetEntry) {
        let remarks_width = COLUMNS[6].1 * MM - 2.0 * CELL_PADDING;
        let remarks = wrap_to_width(&entry.remarks, remarks_width, BODY_SIZE);
        let height = ROW_HEIGHT.max(text_block_height(remarks.len(), BODY_SIZE));
        self.break_page_if_full(height);
        let time = |value: Option<chrono::NaiveTime>| {
            value.map_or_else(|| MISSING.to_string(), |t| t.format("%H:%M").to_string())
        };
        let hours =
            |value: Option<f64>| value.map_or_else(|| MISSING.to_string(), |h| format!("{h:.2}"));
        self.row(
            [
                entry.work_date.format("%Y-%m-%d").to_string(),
                day_name(entry.work_date).to_string(),
                time(entry.start_time),
                time(entry.end_time),
                hours(entry.total_hours),
                hours(entry.overtime_hours),
            ],
            &remarks,
            height,
            BODY_SIZE,
            Weight::Regular,
        );
    }

    fn total_row(&mut self, total_hours: f64, overtime_hours: f64) {
        self.break_page_if_full(ROW_HEIGHT);
        let size = BODY_SIZE;
        let label_width: f32 = COLUMNS[..4].iter().map(|(_, w)| w * MM).sum();
        let mut x = MARGIN_LEFT;
        self.canvas.cell(
            x,
            self.top,
            label_width,
            ROW_HEIGHT,
            size,
            Weight::Bold,
            Align::Right,
            "TOTAL",
        );
        x += label_width;
        let rest = [
            (COLUMNS[4].1, format!("{total_hours:.2}"), Align::Center),
            (COLUMNS[5].1, format!("{overtime_hours:.2}"), Align::Center),
            (COLUMNS[6].1, String::new(), Align::Left),
        ];
        for (width, text, align) in rest {
            let width = width * MM;
            self.canvas
                .cell(x, self.top, width, ROW_HEIGHT, size, Weight::Bold, align, &text);
            x += width;
        }
        self.top -= ROW_HEIGHT;
    }

    /// Six single-line cells, then the remarks cell with all of its lines.
    fn row(
        &mut self,
        cells: [String; 6],
        remarks: &[String],
        height: f32,
        size: f32,
        weight: Weight,
    ) {
        let mut x = MARGIN_LEFT;
        for ((_, width), text) in COLUMNS.iter().zip(cells.iter()) {
            let width = width * MM;
            self.canvas
                .cell(x, self.top, width, height, size, weight, Align::Center, text);
            x += width;
        }
        let align = match weight {
            Weight::Regular => Align::Left,
            Weight::Bold => Align::Center,
        };
        self.canvas
            .lines_cell(x, self.top, COLUMNS[6].1 * MM, height, size, weight, align, remarks);
        self.top -= height;
    }

    fn break_page_if_full(&mut self, height: f32) {
        if self.top - height >= MARGIN_BOTTOM {
            return;
        }
        self.canvas.add_page();
        self.top = A4_HEIGHT - MARGIN_TOP;
        self.table_header();
    }

    #[cfg(test)]
    fn page_count(&self) -> usize {
        self.canvas.page_count()
    }
}
