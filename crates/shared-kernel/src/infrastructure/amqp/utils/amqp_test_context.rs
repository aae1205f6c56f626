// crates/shared-kernel/src/infrastructure/amqp/utils/amqp_test_context.rs

use crate::infrastructure::amqp::factories::AmqpContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::rabbitmq::RabbitMq;

const AMQP_PORT: u16 = 5672;

pub struct AmqpTestContext {
    context: AmqpContext,
    _container: ContainerAsync<RabbitMq>,
}

impl AmqpTestContext {
    pub async fn start() -> Self {
        let container = RabbitMq::default()
            .start()
            .await
            .expect("Failed to start RabbitMQ container");

        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(AMQP_PORT).await.unwrap();
        let url = format!("amqp://guest:guest@{}:{}/%2f", host, port);

        let context = AmqpContext::builder_raw()
            .with_url(url)
            .with_connection_name("integration-tests")
            .build()
            .await
            .expect("Failed to build AmqpContext for tests");

        Self {
            context,
            _container: container,
        }
    }

    pub fn context(&self) -> &AmqpContext {
        &self.context
    }
}
