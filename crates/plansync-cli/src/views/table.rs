use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use plansync_core::models::{DateFields, FieldHandle};

#[derive(Debug, Clone)]
pub struct ViewPlanRow {
    pub task_id: String,
    pub issue_number: u64,
    pub days: Option<(u32, u32)>,
    pub dates: Option<(NaiveDate, NaiveDate)>,
}

pub fn display_plan(rows: &[ViewPlanRow]) {
    if rows.is_empty() {
        println!("No issues mapped.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Task", "Issue", "Days", "Start", "End"]);

    for row in rows {
        let mut table_row = Row::new();
        table_row.add_cell(Cell::new(&row.task_id));
        table_row.add_cell(Cell::new(format!("#{}", row.issue_number)));

        match (row.days, row.dates) {
            (Some((start_day, end_day)), Some((start, end))) => {
                let days = if start_day == end_day {
                    format!("{}", start_day)
                } else {
                    format!("{}-{}", start_day, end_day)
                };
                table_row.add_cell(Cell::new(days));
                table_row.add_cell(Cell::new(start.format("%Y-%m-%d")).fg(Color::Cyan));
                table_row.add_cell(Cell::new(end.format("%Y-%m-%d")).fg(Color::Cyan));
            }
            _ => {
                table_row.add_cell(
                    Cell::new("no schedule")
                        .fg(Color::DarkGrey)
                        .add_attribute(Attribute::Italic),
                );
                table_row.add_cell(Cell::new("-"));
                table_row.add_cell(Cell::new("-"));
            }
        }

        table.add_row(table_row);
    }

    println!("{table}");
}

fn role_of(field: &FieldHandle, selected: Option<&DateFields>) -> &'static str {
    let Some(selected) = selected else {
        return "";
    };
    let is_start = selected.start.as_ref().is_some_and(|f| f.id == field.id);
    let is_end = selected.end.as_ref().is_some_and(|f| f.id == field.id);
    match (is_start, is_end) {
        (true, true) => "start + end",
        (true, false) => "start",
        (false, true) => "end",
        (false, false) => "",
    }
}

pub fn display_fields(fields: &[FieldHandle], selected: Option<&DateFields>) {
    if fields.is_empty() {
        println!("No fields found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Type", "Role", "ID"]);

    for field in fields {
        let role = role_of(field, selected);
        let mut name_cell = Cell::new(&field.name);
        if !role.is_empty() {
            name_cell = name_cell.fg(Color::Green).add_attribute(Attribute::Bold);
        }

        let mut row = Row::new();
        row.add_cell(name_cell);
        row.add_cell(Cell::new(field.kind.to_string()));
        row.add_cell(Cell::new(role));
        row.add_cell(Cell::new(&field.id).fg(Color::DarkGrey));
        table.add_row(row);
    }

    println!("{table}");
}
