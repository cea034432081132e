//! Terminal commands for driving the simulated world.

use claim_core::{BlockPos, Position};

/// Single-player block actions, one per gated event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Interact,
    Break,
    Entity,
    UseOn,
}

impl Action {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Interact => "interact",
            Self::Break => "break",
            Self::Entity => "entity",
            Self::UseOn => "use",
        }
    }
}

/// Commands that can be sent from the input thread
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Join { name: String, at: Position },
    Leave { name: String },
    Move { name: String, at: Position },
    Point { name: String, x: i32, z: i32 },
    Act { action: Action, name: String, block: BlockPos },
    Explode { center: BlockPos, radius: i32 },
    Claims,
    Help,
    Quit,
    Invalid(String),
    Unknown(String),
}

pub const HELP: &[&str] = &[
    "join <name> <x> <y> <z>          - Connect a player",
    "leave <name>                     - Disconnect a player",
    "move <name> <x> <y> <z>          - Teleport a player",
    "point <name> <x> <z>             - Click a block with the selection tool",
    "break|interact|entity|use <name> <x> <y> <z>",
    "                                 - Act on a block",
    "explode <x> <y> <z> <radius>     - Detonate an explosion",
    "claims                           - List claims",
    "q, quit                          - Quit the server",
    "help                             - Show this help",
];

pub fn parse_command(input: &str) -> Command {
    let mut words = input.split_whitespace();
    let Some(verb) = words.next() else {
        return Command::Unknown(String::new());
    };
    let args: Vec<&str> = words.collect();
    let verb = verb.to_lowercase();

    let parsed = match verb.as_str() {
        "join" => name_and_position(&args).map(|(name, at)| Command::Join { name, at }),
        "move" | "tp" => name_and_position(&args).map(|(name, at)| Command::Move { name, at }),
        "leave" => match args.as_slice() {
            [name] => Ok(Command::Leave {
                name: (*name).to_string(),
            }),
            _ => Err("usage: leave <name>"),
        },
        "point" => match args.as_slice() {
            [name, x, z] => ints([x, z]).map(|[x, z]| Command::Point {
                name: (*name).to_string(),
                x,
                z,
            }),
            _ => Err("usage: point <name> <x> <z>"),
        },
        "break" | "interact" | "entity" | "use" => {
            let action = match verb.as_str() {
                "break" => Action::Break,
                "interact" => Action::Interact,
                "entity" => Action::Entity,
                _ => Action::UseOn,
            };
            match args.as_slice() {
                [name, x, y, z] => ints([x, y, z]).map(|[x, y, z]| Command::Act {
                    action,
                    name: (*name).to_string(),
                    block: BlockPos::new(x, y, z),
                }),
                _ => Err("usage: <action> <name> <x> <y> <z>"),
            }
        }
        "explode" => match args.as_slice() {
            [x, y, z, radius] => ints([x, y, z, radius]).map(|[x, y, z, radius]| {
                Command::Explode {
                    center: BlockPos::new(x, y, z),
                    radius,
                }
            }),
            _ => Err("usage: explode <x> <y> <z> <radius>"),
        },
        "claims" | "c" => Ok(Command::Claims),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "help" | "h" | "?" => Ok(Command::Help),
        other => Ok(Command::Unknown(other.to_string())),
    };

    parsed.unwrap_or_else(|usage| Command::Invalid(usage.to_string()))
}

fn name_and_position(args: &[&str]) -> Result<(String, Position), &'static str> {
    let [name, x, y, z] = args else {
        return Err("usage: <verb> <name> <x> <y> <z>");
    };
    let parse = |s: &str| s.parse::<f64>().map_err(|_| "coordinates must be numbers");
    Ok((
        (*name).to_string(),
        Position::new(parse(*x)?, parse(*y)?, parse(*z)?),
    ))
}

fn ints<const N: usize>(args: [&&str; N]) -> Result<[i32; N], &'static str> {
    let mut out = [0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .map_err(|_| "coordinates must be whole numbers")?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join() {
        assert_eq!(
            parse_command("join alice 1.5 64 -3"),
            Command::Join {
                name: "alice".to_string(),
                at: Position::new(1.5, 64.0, -3.0),
            }
        );
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(
            parse_command("  POINT bob 10 -20 "),
            Command::Point {
                name: "bob".to_string(),
                x: 10,
                z: -20,
            }
        );
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            parse_command("break bob 5 0 5"),
            Command::Act {
                action: Action::Break,
                name: "bob".to_string(),
                block: BlockPos::new(5, 0, 5),
            }
        );
        assert!(matches!(
            parse_command("use bob 5 0 5"),
            Command::Act {
                action: Action::UseOn,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_explode() {
        assert_eq!(
            parse_command("explode 0 64 0 3"),
            Command::Explode {
                center: BlockPos::new(0, 64, 0),
                radius: 3,
            }
        );
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(parse_command("point bob 1.5 2"), Command::Invalid(_)));
        assert!(matches!(parse_command("join bob 1 2"), Command::Invalid(_)));
        assert!(matches!(parse_command("leave"), Command::Invalid(_)));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("claims"), Command::Claims);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command(""), Command::Unknown(String::new()));
        assert_eq!(
            parse_command("fly"),
            Command::Unknown("fly".to_string())
        );
    }
}
