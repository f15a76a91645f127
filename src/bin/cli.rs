// CodeCollab CLI
// Drives the contest API and the editor socket from a terminal, and runs
// automated validation scenarios against a live server.

use clap::{Parser, Subcommand};
use colored::*;
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::io::{self, Write};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, Duration};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const DEMO_EMAIL: &str = "demo@demo.com";
const DEMO_PASSWORD: &str = "demo123";
const DEMO_CONTEST: &str = "contest-demo";
const DEMO_PROBLEM: &str = "demo-1";

#[derive(Parser)]
#[command(name = "codecollab-cli")]
#[command(about = "CodeCollab CLI: contest API client and editor socket tester", long_about = None)]
struct Cli {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health endpoint
    Health,

    /// Create an account and print its token
    Signup {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Log in and print a token
    Login {
        #[arg(short, long, default_value = DEMO_EMAIL)]
        email: String,

        #[arg(short, long, default_value = DEMO_PASSWORD)]
        password: String,
    },

    /// List all contests
    Contests,

    /// Show one contest
    Contest {
        /// Contest ID
        id: String,
    },

    /// Register for a contest
    Join {
        /// Contest ID
        id: String,

        /// Bearer token from `login`
        #[arg(short, long)]
        token: String,
    },

    /// List the problems of a contest
    Problems {
        /// Contest ID
        contest: String,
    },

    /// Submit a solution
    Submit {
        #[arg(short, long)]
        token: String,

        #[arg(short, long)]
        contest: String,

        #[arg(short, long)]
        problem: String,

        /// Path to the source file
        #[arg(short, long)]
        file: std::path::PathBuf,

        #[arg(short, long, default_value = "javascript")]
        language: String,
    },

    /// Show the ranked leaderboard of a contest
    Leaderboard {
        /// Contest ID
        contest: String,
    },

    /// Print a fresh room ID
    NewRoom,

    /// Join an editor room and stream its events (press Ctrl+C to exit)
    JoinRoom {
        #[arg(short, long)]
        room_id: String,

        #[arg(short, long)]
        username: String,
    },

    /// Join a room, send one chat message, and leave
    Chat {
        #[arg(short, long)]
        room_id: String,

        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        message: String,
    },

    /// Run automated validation scenarios
    Validate {
        /// Run all validation tests
        #[arg(short, long)]
        all: bool,

        /// Test specific scenario
        #[arg(short, long)]
        scenario: Option<String>,
    },

    /// Interactive mode - send raw socket frames
    Interactive,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let server = cli.server.as_str();

    match cli.command {
        Commands::Health => check_health(server).await,
        Commands::Signup {
            username,
            email,
            password,
        } => signup(server, &username, &email, &password).await,
        Commands::Login { email, password } => {
            login(server, &email, &password).await;
        }
        Commands::Contests => list_contests(server).await,
        Commands::Contest { id } => show_contest(server, &id).await,
        Commands::Join { id, token } => join_contest(server, &id, &token).await,
        Commands::Problems { contest } => list_problems(server, &contest).await,
        Commands::Submit {
            token,
            contest,
            problem,
            file,
            language,
        } => match std::fs::read_to_string(&file) {
            Ok(code) => submit(server, &token, &contest, &problem, &code, &language).await,
            Err(e) => println!("{} Cannot read {}: {}", "✗".red(), file.display(), e),
        },
        Commands::Leaderboard { contest } => show_leaderboard(server, &contest).await,
        Commands::NewRoom => {
            let room_id = uuid::Uuid::new_v4().to_string();
            println!("{} {}", "Room ID:".bold(), room_id.green().bold());
        }
        Commands::JoinRoom { room_id, username } => join_room(server, &room_id, &username).await,
        Commands::Chat {
            room_id,
            username,
            message,
        } => send_chat(server, &room_id, &username, &message).await,
        Commands::Validate { all, scenario } => {
            if all {
                run_all_validations(server).await;
            } else if let Some(s) = scenario {
                run_scenario(server, &s).await;
            } else {
                println!("{}", "Use --all or --scenario <name>".yellow());
                list_scenarios();
            }
        }
        Commands::Interactive => interactive_mode(server).await,
    }
}

fn api_url(server: &str, path: &str) -> String {
    format!("http://{}/api/{}", server, path)
}

fn ws_url(server: &str) -> String {
    format!("ws://{}/ws", server)
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Unwraps the `{success, data, message}` envelope, printing failures
async fn read_envelope(response: reqwest::Response) -> Option<Value> {
    let status = response.status();
    let body = match response.json::<Value>().await {
        Ok(body) => body,
        Err(e) => {
            println!("{} Unreadable response ({}): {}", "✗".red(), status, e);
            return None;
        }
    };

    if body["success"].as_bool() == Some(true) {
        if let Some(message) = body["message"].as_str() {
            println!("{} {}", "✓".green(), message);
        }
        Some(body["data"].clone())
    } else {
        println!(
            "{} {} ({})",
            "✗".red(),
            body["message"].as_str().unwrap_or("request failed"),
            status
        );
        None
    }
}

async fn get_data(server: &str, path: &str) -> Option<Value> {
    let client = reqwest::Client::new();
    match client.get(api_url(server, path)).send().await {
        Ok(response) => read_envelope(response).await,
        Err(e) => {
            println!("{} Cannot connect to server: {}", "✗".red(), e);
            println!("  Make sure the server is running on {}", server);
            None
        }
    }
}

async fn post_data(server: &str, path: &str, token: Option<&str>, body: Value) -> Option<Value> {
    let client = reqwest::Client::new();
    let mut request = client.post(api_url(server, path)).json(&body);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    match request.send().await {
        Ok(response) => read_envelope(response).await,
        Err(e) => {
            println!("{} Cannot connect to server: {}", "✗".red(), e);
            None
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

async fn check_health(server: &str) {
    println!("{}", "Checking server health...".cyan());

    let client = reqwest::Client::new();
    match client.get(api_url(server, "health")).send().await {
        Ok(resp) => {
            let status = resp.status();
            if status.is_success() {
                println!("{} Health check passed", "✓".green());

                if let Ok(body) = resp.json::<Value>().await {
                    println!("  Status: {}", body["status"].as_str().unwrap_or("unknown"));
                    println!("  Service: {}", body["service"].as_str().unwrap_or("unknown"));
                    println!("  Version: {}", body["version"].as_str().unwrap_or("unknown"));
                }
            } else {
                println!("{} Health check failed: {}", "✗".red(), status);
            }
        }
        Err(e) => {
            println!("{} Cannot connect to server: {}", "✗".red(), e);
            println!("  Make sure the server is running on {}", server);
        }
    }
}

async fn signup(server: &str, username: &str, email: &str, password: &str) {
    println!("{}", "Creating account...".cyan());

    let body = json!({ "username": username, "email": email, "password": password });
    if let Some(data) = post_data(server, "auth/signup", None, body).await {
        println!("{} Account created: {}", "✓".green(), data["user"]["id"]);
        print_token(&data);
    }
}

async fn login(server: &str, email: &str, password: &str) -> Option<String> {
    println!("{}", "Logging in...".cyan());

    let body = json!({ "email": email, "password": password });
    let data = post_data(server, "auth/login", None, body).await?;
    println!(
        "{} Logged in as {}",
        "✓".green(),
        data["user"]["username"].as_str().unwrap_or("unknown").bold()
    );
    print_token(&data);
    data["token"].as_str().map(String::from)
}

fn print_token(data: &Value) {
    match data["token"].as_str() {
        Some(token) => {
            println!("\n{}", "═".repeat(60).green());
            println!("{} {}", "Token:".bold(), token.green());
            println!("{}", "═".repeat(60).green());
        }
        None => println!("{}", "⚠ Server issued no token (auth disabled)".yellow()),
    }
}

async fn list_contests(server: &str) {
    println!("{}", "Fetching contests...".cyan());

    let Some(data) = get_data(server, "contests").await else {
        return;
    };

    for contest in data.as_array().into_iter().flatten() {
        let status = contest["status"].as_str().unwrap_or("unknown");
        let status = match status {
            "running" => status.green(),
            "upcoming" => status.yellow(),
            _ => status.dimmed(),
        };
        println!(
            "  {} {} [{}] {}/{} participants",
            contest["id"].as_str().unwrap_or("?").cyan(),
            contest["title"].as_str().unwrap_or(""),
            status,
            contest["currentParticipants"],
            contest["maxParticipants"]
        );
    }
}

async fn show_contest(server: &str, id: &str) {
    if let Some(data) = get_data(server, &format!("contests/{}", segment(id))).await {
        println!("{}", pretty(&data));
    }
}

async fn join_contest(server: &str, id: &str, token: &str) {
    println!("{} {}", "Joining contest".cyan(), id.bold());
    post_data(server, &format!("contests/{}/join", segment(id)), Some(token), json!({})).await;
}

async fn list_problems(server: &str, contest: &str) {
    let path = format!("contests/{}/problems", segment(contest));
    let Some(data) = get_data(server, &path).await else {
        return;
    };

    for problem in data.as_array().into_iter().flatten() {
        println!(
            "  {} {} ({}, {} pts)",
            problem["id"].as_str().unwrap_or("?").cyan(),
            problem["title"].as_str().unwrap_or(""),
            problem["difficulty"].as_str().unwrap_or("?"),
            problem["points"]
        );
    }
}

async fn submit(server: &str, token: &str, contest: &str, problem: &str, code: &str, language: &str) {
    println!("{}", "Submitting solution...".cyan());

    let body = json!({
        "contestId": contest,
        "problemId": problem,
        "code": code,
        "language": language,
    });
    let Some(data) = post_data(server, "submissions", Some(token), body).await else {
        return;
    };

    let status = data["status"].as_str().unwrap_or("unknown");
    let status = if status == "accepted" { status.green() } else { status.red() };
    println!("{} Submission {}", "✓".green(), data["id"]);
    println!("  Status: {}", status);
    println!(
        "  Tests: {}/{}",
        data["testCasesPassed"], data["totalTestCases"]
    );
    println!("  Score: {}", data["score"]);
}

async fn show_leaderboard(server: &str, contest: &str) {
    let path = format!("contests/{}/leaderboard", segment(contest));
    let Some(data) = get_data(server, &path).await else {
        return;
    };

    println!("{}", "Rank  User                 Score  Time  Solved".bold());
    for entry in data.as_array().into_iter().flatten() {
        println!(
            "{:<5} {:<20} {:>5} {:>5} {:>7}",
            entry["rank"],
            entry["username"].as_str().unwrap_or("?"),
            entry["totalScore"],
            entry["totalTime"],
            entry["problemsSolved"]
        );
    }
}

async fn connect(server: &str) -> Option<Socket> {
    match connect_async(ws_url(server)).await {
        Ok((ws_stream, _)) => Some(ws_stream),
        Err(e) => {
            println!("{} Cannot connect to server: {}", "✗".red(), e);
            None
        }
    }
}

async fn send_frame(socket: &mut Socket, frame: Value) -> bool {
    socket.send(Message::Text(frame.to_string())).await.is_ok()
}

/// Next JSON text frame, or `None` on timeout or close
async fn next_frame(socket: &mut Socket, wait: Duration) -> Option<Value> {
    loop {
        match timeout(wait, socket.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => return serde_json::from_str(&text).ok(),
            Ok(Some(Ok(Message::Close(_)))) | Ok(None) | Ok(Some(Err(_))) | Err(_) => return None,
            Ok(Some(Ok(_))) => continue,
        }
    }
}

/// Reads frames until one of the given type arrives
async fn wait_for(socket: &mut Socket, event_type: &str) -> Option<Value> {
    loop {
        let frame = next_frame(socket, Duration::from_secs(3)).await?;
        if frame["type"] == event_type {
            return Some(frame);
        }
    }
}

async fn join_frame(socket: &mut Socket, room_id: &str, username: &str) -> Option<Value> {
    let frame = json!({ "type": "join", "roomId": room_id, "username": username });
    if !send_frame(socket, frame).await {
        return None;
    }
    wait_for(socket, "joined").await
}

async fn join_room(server: &str, room_id: &str, username: &str) {
    println!("{}", "Joining room...".cyan());
    println!("  Room ID: {}", room_id);
    println!("  Username: {}", username);

    let Some(mut socket) = connect(server).await else {
        return;
    };

    match join_frame(&mut socket, room_id, username).await {
        Some(joined) => {
            println!("{} Joined as {}", "✓".green(), joined["socketId"]);
            let names: Vec<&str> = joined["clients"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|c| c["username"].as_str())
                .collect();
            println!("  In room: {}", names.join(", "));
        }
        None => {
            println!("{} No joined event received", "✗".red());
            return;
        }
    }

    println!("\n{}", "Streaming room events...".yellow());
    println!("Press {} to disconnect.", "Ctrl+C".bold());

    loop {
        match timeout(Duration::from_secs(30), socket.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => print_event(&text),
            Ok(Some(Ok(Message::Close(_)))) => {
                println!("{} Server closed the connection", "✗".yellow());
                break;
            }
            Ok(Some(Ok(_))) => continue,
            Ok(Some(Err(e))) => {
                println!("{} Connection error: {}", "✗".red(), e);
                break;
            }
            Ok(None) => {
                println!("{} Connection closed", "✗".yellow());
                break;
            }
            Err(_) => continue,
        }
    }
}

fn print_event(text: &str) {
    let Ok(event) = serde_json::from_str::<Value>(text) else {
        println!("{} {}", "◀".green(), text.bright_white());
        return;
    };

    match event["type"].as_str() {
        Some("joined") => println!("{} {} joined", "◀".green(), event["username"]),
        Some("disconnected") => println!("{} {} left", "◀".yellow(), event["username"]),
        Some("chat-message") => println!(
            "{} {}: {}",
            "◀".green(),
            event["username"].as_str().unwrap_or("?").bold(),
            event["message"].as_str().unwrap_or("")
        ),
        Some("code-change") => println!(
            "{} code updated ({} bytes)",
            "◀".cyan(),
            event["code"].as_str().map(str::len).unwrap_or(0)
        ),
        _ => println!("{} {}", "◀".green(), text.bright_white()),
    }
}

async fn send_chat(server: &str, room_id: &str, username: &str, message: &str) {
    let Some(mut socket) = connect(server).await else {
        return;
    };
    if join_frame(&mut socket, room_id, username).await.is_none() {
        println!("{} Could not join room", "✗".red());
        return;
    }

    let frame = json!({
        "type": "chat-message",
        "roomId": room_id,
        "username": username,
        "message": message,
    });
    if send_frame(&mut socket, frame).await && wait_for(&mut socket, "chat-message").await.is_some() {
        println!("{} Message delivered", "✓".green());
    } else {
        println!("{} Message not echoed back", "✗".red());
    }
    let _ = socket.close(None).await;
}

const SCENARIOS: &[(&str, &str)] = &[
    ("health", "Health endpoint answers"),
    ("auth", "Demo user login issues a token"),
    ("contests", "Contest listing with derived status"),
    ("submission", "Join the demo contest and submit a solution"),
    ("leaderboard", "Leaderboard is ranked"),
    ("room-join", "Two sockets see each other join"),
    ("code-sync", "Code changes reach the other peer only"),
    ("chat", "Chat reaches every member"),
    ("disconnect", "Peers are told when someone leaves"),
];

fn list_scenarios() {
    println!("\n{}", "Available Validation Scenarios:".bold());
    for (name, description) in SCENARIOS {
        println!("  {} - {}", name.cyan(), description);
    }
    println!("\nExample: codecollab-cli validate --scenario code-sync");
}

async fn run_named(server: &str, scenario: &str) -> Option<bool> {
    let result = match scenario {
        "health" => validate_health(server).await,
        "auth" => validate_auth(server).await,
        "contests" => validate_contests(server).await,
        "submission" => validate_submission(server).await,
        "leaderboard" => validate_leaderboard(server).await,
        "room-join" => validate_room_join(server).await,
        "code-sync" => validate_code_sync(server).await,
        "chat" => validate_chat(server).await,
        "disconnect" => validate_disconnect(server).await,
        _ => return None,
    };
    Some(result)
}

async fn run_scenario(server: &str, scenario: &str) {
    println!("\n{} {}", "Running scenario:".bold(), scenario.cyan());
    println!("{}", "─".repeat(60));

    match run_named(server, scenario).await {
        Some(true) => println!("\n{} Scenario passed", "✓".green().bold()),
        Some(false) => println!("\n{} Scenario failed", "✗".red().bold()),
        None => {
            println!("{} Unknown scenario: {}", "✗".red(), scenario);
            list_scenarios();
        }
    }
}

async fn run_all_validations(server: &str) {
    println!("\n{}", "Running All Validation Tests".bold().green());
    println!("{}\n", "═".repeat(60).green());

    let mut passed = 0;
    let mut failed = 0;

    for (scenario, _) in SCENARIOS {
        println!("\n{} Testing: {}", "▶".cyan(), scenario.bold());
        println!("{}", "─".repeat(60));

        if run_named(server, scenario).await == Some(true) {
            passed += 1;
        } else {
            failed += 1;
        }

        sleep(Duration::from_millis(200)).await;
    }

    println!("\n{}", "═".repeat(60).green());
    println!("{}", "Validation Summary".bold());
    println!("{}", "═".repeat(60).green());
    println!("  {} Passed: {}", "✓".green(), passed.to_string().green());
    println!("  {} Failed: {}", "✗".red(), failed.to_string().red());
    println!("  Total: {}", passed + failed);

    if failed == 0 {
        println!("\n{}", "All validations passed! 🎉".green().bold());
    } else {
        println!("\n{}", "Some validations failed. Check output above.".yellow());
    }
}

async fn validate_health(server: &str) -> bool {
    let client = reqwest::Client::new();
    match client.get(api_url(server, "health")).send().await {
        Ok(resp) => match resp.json::<Value>().await {
            Ok(body) if body["status"] == "healthy" => {
                println!("{} Server healthy", "✓".green());
                true
            }
            _ => {
                println!("{} Unexpected health response", "✗".red());
                false
            }
        },
        Err(e) => {
            println!("{} Connection failed: {}", "✗".red(), e);
            false
        }
    }
}

async fn validate_auth(server: &str) -> bool {
    login(server, DEMO_EMAIL, DEMO_PASSWORD).await.is_some()
}

async fn validate_contests(server: &str) -> bool {
    let Some(data) = get_data(server, "contests").await else {
        return false;
    };
    let contests = data.as_array().cloned().unwrap_or_default();
    let valid = contests
        .iter()
        .all(|c| matches!(c["status"].as_str(), Some("upcoming" | "running" | "finished")));

    if valid {
        println!("{} {} contests, all with a status", "✓".green(), contests.len());
    } else {
        println!("{} Contest without a valid status", "✗".red());
    }
    valid
}

async fn validate_submission(server: &str) -> bool {
    let Some(token) = login(server, DEMO_EMAIL, DEMO_PASSWORD).await else {
        return false;
    };

    let join_path = format!("contests/{}/join", DEMO_CONTEST);
    if post_data(server, &join_path, Some(&token), json!({})).await.is_none() {
        return false;
    }

    let body = json!({
        "contestId": DEMO_CONTEST,
        "problemId": DEMO_PROBLEM,
        "code": "console.log('validator')",
        "language": "javascript",
    });
    match post_data(server, "submissions", Some(&token), body).await {
        Some(data) if data["status"].is_string() => {
            println!("{} Submission judged: {}", "✓".green(), data["status"]);
            true
        }
        _ => false,
    }
}

async fn validate_leaderboard(server: &str) -> bool {
    let path = format!("contests/{}/leaderboard", DEMO_CONTEST);
    let Some(data) = get_data(server, &path).await else {
        return false;
    };

    let entries = data.as_array().cloned().unwrap_or_default();
    let ranked = entries
        .iter()
        .enumerate()
        .all(|(i, e)| e["rank"].as_u64() == Some(i as u64 + 1));
    let ordered = entries.windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        let (sa, sb) = (a["totalScore"].as_u64(), b["totalScore"].as_u64());
        sa > sb || (sa == sb && a["totalTime"].as_u64() <= b["totalTime"].as_u64())
    });

    if ranked && ordered {
        println!("{} {} ranked entries", "✓".green(), entries.len());
        true
    } else {
        println!("{} Leaderboard out of order", "✗".red());
        false
    }
}

fn validation_room() -> String {
    format!("validate-{}", uuid::Uuid::new_v4())
}

/// Connects two sockets to a fresh room and drains their join events
async fn pair(server: &str) -> Option<(String, Socket, Socket)> {
    let room_id = validation_room();
    let mut first = connect(server).await?;
    join_frame(&mut first, &room_id, "validator-a").await?;

    let mut second = connect(server).await?;
    join_frame(&mut second, &room_id, "validator-b").await?;
    wait_for(&mut first, "joined").await?;

    Some((room_id, first, second))
}

async fn validate_room_join(server: &str) -> bool {
    let room_id = validation_room();
    let Some(mut first) = connect(server).await else {
        return false;
    };
    if join_frame(&mut first, &room_id, "validator-a").await.is_none() {
        println!("{} First join not acknowledged", "✗".red());
        return false;
    }

    let Some(mut second) = connect(server).await else {
        return false;
    };
    let Some(joined) = join_frame(&mut second, &room_id, "validator-b").await else {
        println!("{} Second join not acknowledged", "✗".red());
        return false;
    };

    let seen_by_first = wait_for(&mut first, "joined").await;
    let count = joined["clients"].as_array().map(Vec::len).unwrap_or(0);

    if count == 2 && seen_by_first.is_some() {
        println!("{} Both members listed and notified", "✓".green());
        true
    } else {
        println!("{} Expected 2 clients, got {}", "✗".red(), count);
        false
    }
}

async fn validate_code_sync(server: &str) -> bool {
    let Some((room_id, mut first, mut second)) = pair(server).await else {
        println!("{} Could not set up room", "✗".red());
        return false;
    };

    let frame = json!({ "type": "code-change", "roomId": room_id, "code": "let x = 42;" });
    if !send_frame(&mut first, frame).await {
        return false;
    }

    let received = wait_for(&mut second, "code-change").await;
    let echoed = next_frame(&mut first, Duration::from_millis(500)).await;

    match received {
        Some(event) if event["code"] == "let x = 42;" && echoed.is_none() => {
            println!("{} Peer received the change, sender did not", "✓".green());
            true
        }
        _ => {
            println!("{} Code change not relayed as expected", "✗".red());
            false
        }
    }
}

async fn validate_chat(server: &str) -> bool {
    let Some((room_id, mut first, mut second)) = pair(server).await else {
        println!("{} Could not set up room", "✗".red());
        return false;
    };

    let frame = json!({
        "type": "chat-message",
        "roomId": room_id,
        "username": "validator-a",
        "message": "hello",
    });
    if !send_frame(&mut first, frame).await {
        return false;
    }

    let to_sender = wait_for(&mut first, "chat-message").await;
    let to_peer = wait_for(&mut second, "chat-message").await;

    if to_sender.is_some() && to_peer.is_some() {
        println!("{} Chat delivered to both members", "✓".green());
        true
    } else {
        println!("{} Chat missing for a member", "✗".red());
        false
    }
}

async fn validate_disconnect(server: &str) -> bool {
    let Some((_, first, mut second)) = pair(server).await else {
        println!("{} Could not set up room", "✗".red());
        return false;
    };

    drop(first);

    match wait_for(&mut second, "disconnected").await {
        Some(event) if event["username"] == "validator-a" => {
            println!("{} Departure announced", "✓".green());
            true
        }
        _ => {
            println!("{} No disconnected event", "✗".red());
            false
        }
    }
}

async fn interactive_mode(server: &str) {
    println!("\n{}", "Interactive Mode".bold().green());
    println!("{}", "═".repeat(60).green());
    println!("Type {} for help, {} to quit\n", "help".cyan(), "quit".cyan());

    let Some(socket) = connect(server).await else {
        return;
    };
    println!("{} Connected to server", "✓".green());

    let (mut write, mut read) = socket.split();

    let receive_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = read.next().await {
            if let Message::Text(text) = msg {
                println!();
                print_event(&text);
            }
        }
    });

    loop {
        print!("{} ", "►".cyan());
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "exit" {
            println!("Goodbye!");
            break;
        }

        if input == "help" {
            print_interactive_help();
            continue;
        }

        if let Ok(parsed) = serde_json::from_str::<Value>(input) {
            if write.send(Message::Text(parsed.to_string())).await.is_ok() {
                println!("{} Message sent", "✓".green());
            } else {
                println!("{} Failed to send message", "✗".red());
                break;
            }
        } else {
            println!("{} Invalid JSON. Type 'help' for examples.", "✗".yellow());
        }
    }

    receive_task.abort();
}

fn print_interactive_help() {
    println!("\n{}", "Interactive Mode Commands".bold());
    println!("{}", "─".repeat(60));
    println!("Send JSON frames directly to the editor socket.\n");

    println!("{}", "Example Messages:".bold());
    println!("\n{}:", "Join Room".cyan());
    println!(r#"  {{"type":"join","roomId":"room-1","username":"ada"}}"#);

    println!("\n{}:", "Code Change".cyan());
    println!(r#"  {{"type":"code-change","roomId":"room-1","code":"console.log(1)"}}"#);

    println!("\n{}:", "Sync Code To Peer".cyan());
    println!(r#"  {{"type":"sync-code","socketId":"<socket id>","code":"console.log(1)"}}"#);

    println!("\n{}:", "Chat".cyan());
    println!(r#"  {{"type":"chat-message","roomId":"room-1","username":"ada","message":"hi"}}"#);

    println!("\n{}:", "Leave".cyan());
    println!(r#"  {{"type":"leave","roomId":"room-1"}}"#);

    println!("\n{}: quit, exit", "Commands".bold());
    println!();
}
