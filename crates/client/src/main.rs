use std::io::{self, BufRead, Write};

use anyhow::Result;
use client::{api::ApiClient, app::App};
use tracing_subscriber::EnvFilter;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let base_url = std::env::var("TASKS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let mut app = App::new(ApiClient::new(base_url));

    app.refresh().await;
    print_state(&app);
    println!("commands: list | add <title> [:: <description>] | toggle <id> | rm <id> | quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();

        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "" => {}
            "list" => {
                app.refresh().await;
                print_state(&app);
            }
            "add" => {
                let (title, description) = match rest.split_once("::") {
                    Some((title, description)) => (title.trim(), description.trim()),
                    None => (rest, ""),
                };
                app.title = title.to_string();
                app.description = description.to_string();
                app.submit().await;
                print_state(&app);
            }
            "toggle" => match rest.parse::<i64>() {
                Ok(id) => {
                    app.toggle(id).await;
                    print_state(&app);
                }
                Err(_) => println!("usage: toggle <id>"),
            },
            "rm" => match rest.parse::<i64>() {
                Ok(id) => {
                    app.remove(id).await;
                    print_state(&app);
                }
                Err(_) => println!("usage: rm <id>"),
            },
            "quit" | "exit" => break,
            other => println!("unknown command: {other}"),
        }
    }

    Ok(())
}

fn print_state(app: &App) {
    if let Some(error) = &app.error {
        println!("error: {error}");
    }

    if app.tasks.is_empty() {
        println!("no tasks yet");
        return;
    }

    for task in &app.tasks {
        let mark = if task.completed { "x" } else { " " };
        if task.description.is_empty() {
            println!("[{mark}] {:>4}  {}", task.id, task.title);
        } else {
            println!("[{mark}] {:>4}  {}: {}", task.id, task.title, task.description);
        }
    }
}
