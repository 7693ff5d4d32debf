fn main() {
    chatbot_portal::run();
}
