//! Message commands - list, post, react, delete.

use anyhow::Result;
use clap::Args;
use console::{Style, style};
use teams_client::{Channel, ChatMessage};

use super::Context;
use crate::client;

/// Arguments for listing messages.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Channel id (e.g. 19:abc@thread.v2)
    pub channel: String,

    /// Maximum messages to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for posting a message.
#[derive(Args, Debug)]
pub struct SendArgs {
    /// Channel id
    pub channel: String,

    /// Message text (sent as HTML inside a paragraph)
    pub text: String,
}

/// Arguments for adding or removing a reaction.
#[derive(Args, Debug)]
pub struct ReactionArgs {
    /// Channel id
    pub channel: String,

    /// Message id
    pub message_id: String,

    /// Reaction key (like, heart, laugh, surprised, sad, angry)
    pub emote: String,
}

/// Arguments for deleting a message.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Channel id
    pub channel: String,

    /// Message id
    pub message_id: String,
}

/// List the latest messages in a channel.
pub fn fetch(args: FetchArgs, ctx: &Context) -> Result<()> {
    let client = client::build(&ctx.config)?;
    let messages = client.get_messages(&Channel::new(&args.channel))?;
    let shown = limited(&messages, args.limit);

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    println!("{}", style(&args.channel).bold());
    println!("{}", dim.apply_to("─".repeat(50)));

    if messages.is_empty() {
        println!("{}", dim.apply_to("No messages"));
        return Ok(());
    }

    for message in shown {
        println!("{}", format_message(message, ctx.verbose));
    }
    if messages.len() > shown.len() {
        println!(
            "{}",
            dim.apply_to(format!("... and {} more", messages.len() - shown.len()))
        );
    }
    Ok(())
}

/// Post a message.
pub fn send(args: SendArgs, ctx: &Context) -> Result<()> {
    let client = client::build(&ctx.config)?;
    client.send_message(&args.channel, &args.text)?;
    done(ctx, "Message sent")
}

/// Add a reaction.
pub fn react(args: ReactionArgs, ctx: &Context) -> Result<()> {
    let client = client::build(&ctx.config)?;
    client.react_to_message(&args.channel, &args.message_id, &args.emote)?;
    done(ctx, "Reaction added")
}

/// Remove a reaction.
pub fn unreact(args: ReactionArgs, ctx: &Context) -> Result<()> {
    let client = client::build(&ctx.config)?;
    client.remove_reaction(&args.channel, &args.message_id, &args.emote)?;
    done(ctx, "Reaction removed")
}

/// Soft-delete a message.
pub fn delete(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let client = client::build(&ctx.config)?;
    client.delete_message(&args.channel, &args.message_id)?;
    done(ctx, "Message deleted")
}

fn done(ctx: &Context, what: &str) -> Result<()> {
    if ctx.json_output {
        println!("{}", serde_json::json!({ "ok": true }));
    } else {
        let green = Style::new().green();
        println!("{} {}", green.apply_to("✓"), what);
    }
    Ok(())
}

/// First `limit` messages, in server order.
fn limited(messages: &[ChatMessage], limit: usize) -> &[ChatMessage] {
    &messages[..messages.len().min(limit)]
}

/// One-line rendering: `[id] sender: text`.
fn format_message(message: &ChatMessage, verbose: bool) -> String {
    let sender = message.im_display_name.as_deref().unwrap_or("?");
    let text = strip_tags(message.content.as_deref().unwrap_or_default());
    let text = if verbose { text } else { truncate(&text, 80) };
    format!("[{}] {}: {}", message.id, sender, text)
}

/// Drop HTML tags for terminal display. Entities are left alone.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
