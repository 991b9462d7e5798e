use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut child = tokio::process::Command::new("sh")
        .arg("-c")
        .arg("sleep 300; sleep 300")
        .spawn()?;
    let pid = child.id().expect("freshly spawned process has a pid");
    println!(
        "spawned shell tree with root pid {pid} on {}",
        treereap::platform_name()
    );

    // Give the shell a moment to fork its first sleep.
    tokio::time::sleep(Duration::from_millis(200)).await;

    treereap::kill_tree(pid).await;
    child.wait().await?;
    println!("tree reaped, root still running: {}", treereap::is_running(pid));

    Ok(())
}
