pub enum Action {
    SubmitQuestion(String),
    ResetSession(),
}
