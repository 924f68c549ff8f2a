/// A saved three message session in the storage snapshot format.
pub fn transcript_fixture() -> &'static str {
    return r#"[
  {
    "id": "11dd24f9-9863",
    "isUser": false,
    "text": "Hi! I'm Innobot, your robotics mentor. Ask me anything about your kit, Arduino, or circuits!",
    "timestamp": "2024-05-02T09:30:00Z"
  },
  {
    "id": "37c25427-cbd5",
    "isUser": true,
    "text": "What is an Arduino?",
    "timestamp": "2024-05-02T09:31:12Z"
  },
  {
    "id": "8f6c9d11-40a2",
    "isUser": false,
    "text": "An Arduino is a small programmable board that reads sensors and drives motors, LEDs, and more. It's the brain of many beginner robots!",
    "timestamp": "2024-05-02T09:31:19Z"
  }
]"#;
}

/// A typical gateway answer, including multibyte characters.
pub fn answer_fixture() -> &'static str {
    return r#"
A servo is a small motor with a built-in sensor that tells it where it is pointing. Most hobby servos rotate from 0° to 180°. You send them a timed pulse, and the electronics inside move the horn to match. Ohm's law (V = I × R) still applies to the wiring, so keep an eye on the current draw!
"#
    .trim();
}
