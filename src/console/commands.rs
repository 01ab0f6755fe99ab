//! Built-in command handlers
//!
//! Every handler checks the full shape of its arguments before touching the
//! device, then performs exactly the one action the command names.

use super::context::{CommandContext, TAG};
use super::error::{STATUS_FAILED, STATUS_OK};
use super::parser::Args;
use super::registry::{CommandDescriptor, Registry};
use super::{ConsoleError, ConsoleOutput};
use crate::hal::reset_reason_name;
use crate::logging::LogLevel;

const LOG_USAGE: &str = "log level <tag|*> <error|warn|info|debug|verbose>";

/// `help`, registered ahead of [`BUILTINS`].
pub const HELP: CommandDescriptor = CommandDescriptor::new("help", "List commands", cmd_help);

/// Service commands in listing order
pub static BUILTINS: &[CommandDescriptor] = &[
    CommandDescriptor::new("status", "Show uptime, reset reason, and chip summary", cmd_status),
    CommandDescriptor::new("heap", "Show heap free/min/largest block summary", cmd_heap),
    CommandDescriptor::new("tasks", "Show RTOS task/debug summary", cmd_tasks),
    CommandDescriptor::new("settings", "Get/set/save application settings", cmd_settings),
    CommandDescriptor::new("log", "Runtime log control: log level <tag|*> <level>", cmd_log),
    CommandDescriptor::new("reboot", "Restart the device", cmd_reboot),
];

/// Register `help` and the service commands.
///
/// An already registered `help` is accepted as-is, so a front end that
/// installs its own help command can still call this. Any other failure
/// stops the sequence and is returned.
pub fn register_builtins<const N: usize>(registry: &mut Registry<N>) -> Result<(), ConsoleError> {
    match registry.register(HELP) {
        Ok(()) | Err(ConsoleError::DuplicateCommand) => {}
        Err(e) => return Err(e),
    }

    for cmd in BUILTINS {
        registry.register(*cmd)?;
    }

    Ok(())
}

fn usage(out: &mut dyn ConsoleOutput, text: &str) -> i32 {
    let _ = writeln!(out, "usage: {}", text);
    STATUS_FAILED
}

// --- Command Implementations ---

fn cmd_help(args: &Args<'_>, ctx: &mut CommandContext<'_>) -> i32 {
    match (args.argc(), args.argv(1)) {
        (1, _) => {
            for c in ctx.commands {
                let _ = writeln!(ctx.out, "  {:<14} {}", c.name, c.help);
            }
            STATUS_OK
        }
        (2, Some(name)) => match ctx.commands.iter().find(|c| c.name == name) {
            Some(c) => {
                let _ = writeln!(ctx.out, "{}: {}", c.name, c.help);
                STATUS_OK
            }
            None => {
                let _ = writeln!(ctx.out, "{} '{}'", ConsoleError::NotFound, name);
                ConsoleError::NotFound.status()
            }
        },
        _ => usage(ctx.out, "help [command]"),
    }
}

fn cmd_status(args: &Args<'_>, ctx: &mut CommandContext<'_>) -> i32 {
    if args.argc() != 1 {
        return usage(ctx.out, "status");
    }

    let chip = ctx.device.chip_info();
    let _ = writeln!(ctx.out, "uptime_ms={}", ctx.device.uptime_us() / 1000);
    let _ = writeln!(ctx.out, "reset_reason={}", reset_reason_name(ctx.device.reset_reason()));
    let _ = writeln!(
        ctx.out,
        "cores={} features=0x{:x} revision={}",
        chip.cores, chip.features, chip.revision
    );
    STATUS_OK
}

fn cmd_heap(args: &Args<'_>, ctx: &mut CommandContext<'_>) -> i32 {
    if args.argc() != 1 {
        return usage(ctx.out, "heap");
    }

    let heap = ctx.device.heap_stats();
    let _ = writeln!(
        ctx.out,
        "heap_8bit_free={} min={} largest={}",
        heap.free, heap.min_free, heap.largest_block
    );
    STATUS_OK
}

fn cmd_tasks(args: &Args<'_>, ctx: &mut CommandContext<'_>) -> i32 {
    if args.argc() != 1 {
        return usage(ctx.out, "tasks");
    }

    let tasks = ctx.device.task_stats();
    let _ = writeln!(ctx.out, "num_tasks={}", tasks.count);
    match tasks.stack_hwm_words {
        Some(words) => {
            let _ = writeln!(ctx.out, "current_task_stack_hwm_words={}", words);
        }
        None => {
            let _ = writeln!(ctx.out, "current_task_stack_hwm_words=unavailable");
        }
    }
    STATUS_OK
}

fn cmd_settings(args: &Args<'_>, ctx: &mut CommandContext<'_>) -> i32 {
    let Some(sub) = args.argv(1) else {
        let _ = writeln!(ctx.out, "usage:");
        let _ = writeln!(ctx.out, "  settings get <key>");
        let _ = writeln!(ctx.out, "  settings set <key> <value>");
        let _ = writeln!(ctx.out, "  settings save");
        return STATUS_FAILED;
    };

    match sub {
        "get" => match (args.argc(), args.argv(2)) {
            (3, Some(key)) => ctx.settings.get(key, ctx.out),
            _ => usage(ctx.out, "settings get <key>"),
        },
        "set" => match (args.argc(), args.argv(2), args.argv(3)) {
            (4, Some(key), Some(value)) => ctx.settings.set(key, value, ctx.out),
            _ => usage(ctx.out, "settings set <key> <value>"),
        },
        "save" => match args.argc() {
            2 => ctx.settings.save(ctx.out),
            _ => usage(ctx.out, "settings save"),
        },
        other => {
            let _ = writeln!(ctx.out, "unknown settings subcommand '{}'", other);
            usage(ctx.out, "settings <get|set|save> ...")
        }
    }
}

fn cmd_log(args: &Args<'_>, ctx: &mut CommandContext<'_>) -> i32 {
    let (4, Some("level"), Some(tag), Some(level_name)) =
        (args.argc(), args.argv(1), args.argv(2), args.argv(3))
    else {
        return usage(ctx.out, LOG_USAGE);
    };

    let Some(level) = LogLevel::parse(level_name) else {
        let _ = writeln!(ctx.out, "invalid level '{}'", level_name);
        return usage(ctx.out, LOG_USAGE);
    };

    if let Err(e) = ctx.device.set_log_level(tag, level) {
        let _ = writeln!(ctx.out, "{}", e);
        usage(ctx.out, LOG_USAGE);
        return e.status();
    }

    // The console's own stream follows its tag and the wildcard
    if tag == "*" || tag == TAG {
        ctx.log.set_level(level);
    }

    let _ = writeln!(ctx.out, "log_level_set tag={} level={}", tag, level.name());
    crate::con_info!(ctx.log, ctx.now_us(), TAG, "log level {}={}", tag, level.name());
    STATUS_OK
}

fn cmd_reboot(args: &Args<'_>, ctx: &mut CommandContext<'_>) -> i32 {
    if args.argc() != 1 {
        return usage(ctx.out, "reboot");
    }

    let _ = writeln!(ctx.out, "restarting...");
    ctx.out.flush();
    ctx.device.restart();

    // Only reached when the device simulates the restart
    STATUS_OK
}
