//! Terminal rendering of the list, charts, and edit form.

use etm_core::{Chart, ChartKind, FormSnapshot, ListView, SnapshotBackend, ViewSynchronizer};
use serde_json::json;

const BAR_WIDTH: usize = 40;

pub fn print_views(views: &ViewSynchronizer<SnapshotBackend>) {
    print_list(views.list());
    println!();
    print_chart(views.task_chart());
    println!();
    print_chart(views.contribution_chart());
}

pub fn print_json(views: &ViewSynchronizer<SnapshotBackend>) -> Result<(), String> {
    let payload = json!({
        "list": views.list(),
        "charts": [views.task_chart(), views.contribution_chart()],
    });
    let text = serde_json::to_string_pretty(&payload).map_err(|err| err.to_string())?;
    println!("{text}");
    Ok(())
}

pub fn print_form(snapshot: &FormSnapshot) {
    let input = &snapshot.input;
    println!("#{}", snapshot.index);
    println!("  empId:          {}", input.emp_id);
    println!("  position:       {}", input.position);
    println!("  name:           {}", input.name);
    println!("  contribution:   {}", input.contribution);
    println!("  activities:     {}", input.activities);
    println!("  taskCompleted:  {}", input.task_completed);
    println!("  remarks:        {}", snapshot.remarks);
}

fn print_list(view: &ListView) {
    match view {
        ListView::Empty { message } => println!("{message}"),
        ListView::Rows { rows } => {
            for row in rows {
                println!("[{}] {} ({})", row.index, row.name, row.position);
                println!(
                    "    ID: {} • Task: {}% • Contribution: {}%",
                    row.emp_id, row.task_completed, row.contribution
                );
                println!("    {}", row.activities);
                println!("    {}", row.remarks);
            }
        }
    }
}

fn print_chart(chart: &Chart) {
    let dataset = chart.dataset();
    println!("{}", dataset.label);
    if chart.labels().is_empty() {
        println!("  (no data)");
        return;
    }

    let name_width = chart.labels().iter().map(|label| label.chars().count()).max().unwrap_or(0);
    let total: u32 = dataset.data.iter().map(|value| u32::from(*value)).sum();

    for (label, value) in chart.labels().iter().zip(&dataset.data) {
        let value = u32::from(*value);
        match chart.kind() {
            ChartKind::Bar => {
                let filled = (value as usize * BAR_WIDTH) / 100;
                println!(
                    "  {label:<name_width$} {}{} {value}%",
                    "█".repeat(filled),
                    " ".repeat(BAR_WIDTH - filled)
                );
            }
            ChartKind::Doughnut => {
                let share = if total == 0 {
                    0.0
                } else {
                    f64::from(value) * 100.0 / f64::from(total)
                };
                println!("  {label:<name_width$} {value}% ({share:.1}% of total)");
            }
        }
    }
}
