//! Dispatch behavior through the public API.

use regex::Regex;
use sibyl::{Action, Bot, Config, EventClass, Request, Response, Router};

fn request(line: &str) -> Request {
    line.parse().unwrap()
}

#[test]
fn ping_answered_without_any_user_registration() {
    let router = Router::new("sibyl");
    let batch = router.dispatch(&request("PING :host123"));
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].to_string(), "PONG :host123");
}

#[test]
fn self_sent_lines_never_dispatch() {
    let mut router = Router::new("sibyl");
    router.register(
        EventClass::ChannelMessage,
        Action::new(Some(Regex::new(".*").unwrap()), |event| {
            event.add_response(Response::msg("#chan", "should not happen"));
            Ok(())
        }),
    );

    let own = request(":sibyl!sibyl@bot.host PRIVMSG #chan :hello world");
    assert!(router.dispatch(&own).is_empty());
}

#[test]
fn responses_keep_registration_order_across_actions() {
    let mut router = Router::new("sibyl");
    for n in 1..=3 {
        router.register(
            EventClass::ChannelMessage,
            Action::new(Some(Regex::new("^all$").unwrap()), move |event| {
                event.add_response(Response::msg("#chan", format!("reply {n}")));
                Ok(())
            }),
        );
    }

    let batch = router.dispatch(&request(":alice!a@h PRIVMSG #chan :all"));
    let texts: Vec<_> = batch.iter().filter_map(|r| r.trailing()).collect();
    assert_eq!(texts, vec!["reply 1", "reply 2", "reply 3"]);
}

#[test]
fn one_line_may_yield_many_responses_from_one_action() {
    let mut router = Router::new("sibyl");
    router.register(
        EventClass::Join,
        Action::new(None, |event| {
            let nick = event.request().sending_user().unwrap_or("?").to_string();
            let channel = event.request().channel().unwrap_or("?").to_string();
            event.add_response(Response::msg(channel.clone(), format!("welcome, {nick}")));
            event.add_response(Response::mode(channel, "+v", nick));
            Ok(())
        }),
    );

    let batch = router.dispatch(&request(":carol!c@h JOIN #test"));
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].to_string(), "PRIVMSG #test :welcome, carol");
    assert_eq!(batch[1].to_string(), "MODE #test +v carol");
}

#[test]
fn dispatching_the_same_line_twice_is_identical() {
    let mut router = Router::new("sibyl");
    router.register(
        EventClass::PrivateMessage,
        Action::new(Some(Regex::new(r"^!whoami$").unwrap()), |event| {
            let nick = event.request().sending_user().unwrap_or("?").to_string();
            event.add_response(Response::msg(nick.clone(), format!("you are {nick}")));
            Ok(())
        }),
    );

    let req = request(":dave!d@h PRIVMSG sibyl :!whoami");
    assert_eq!(router.dispatch(&req), router.dispatch(&req));
}

#[test]
fn admin_gate_through_bot_allow_list() {
    let mut config = Config::new("irc.example.org", 6667, "sibyl");
    config.admins.push("alice".to_string());
    let admins = config.admins.clone();

    let mut bot = Bot::new(config).unwrap();
    bot.on_channel(Regex::new(r"^!quit$").unwrap(), move |event| {
        let sender = event.request().sending_user().unwrap_or_default();
        if admins.iter().any(|a| a == sender) {
            event.add_response(Response::quit("told to leave"));
        }
        Ok(())
    });

    let allowed = bot
        .router()
        .dispatch(&request(":alice!a@h PRIVMSG #chan :!quit"));
    assert_eq!(allowed.len(), 1);
    assert_eq!(allowed[0].verb(), "QUIT");

    let denied = bot
        .router()
        .dispatch(&request(":mallory!m@h PRIVMSG #chan :!quit"));
    assert!(denied.is_empty());
}

#[test]
fn notice_and_part_route_to_their_own_classes() {
    let mut router = Router::new("sibyl");
    router.register(
        EventClass::Notice,
        Action::new(None, |event| {
            event.add_response(Response::msg("#log", "saw a notice"));
            Ok(())
        }),
    );

    assert_eq!(
        router
            .dispatch(&request(":a!a@h NOTICE #chan :psst"))
            .len(),
        1
    );
    // PART has no handler here; silently discarded.
    assert!(router.dispatch(&request(":a!a@h PART #chan")).is_empty());
}
