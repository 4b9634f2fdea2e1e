/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Call,
    HangUp,
    Leave,
    Help,
    Say(String),
}

pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let input = match line {
        "/call" => Input::Call,
        "/hangup" => Input::HangUp,
        "/leave" | "/quit" => Input::Leave,
        "/help" => Input::Help,
        _ => Input::Say(line.to_owned()),
    };
    Some(input)
}

pub const HELP: &str = "/call     start the call\n\
                        /hangup   end the call, stay in the room\n\
                        /leave    leave the room and exit\n\
                        anything else is sent as a chat message";
