//! 从定义文件构建网络

use super::id::ComponentId;
use super::network::Network;
use crate::distributor;
use crate::error::Result;
use crate::generator::{Binding, Constant, Gaussian, Generator, Skewed, Uniform};
use crate::sim::{ComponentSpec, GeneratorSpec, NetworkSpec, derive_seed};
use tracing::info;

/// 按定义构造生成器
pub fn build_generator(spec: &GeneratorSpec, seed: u64) -> Result<Box<dyn Generator>> {
    Ok(match *spec {
        GeneratorSpec::Constant { value } => Box::new(Constant::new(value)?),
        GeneratorSpec::Uniform { min, max } => Box::new(Uniform::new(min, max, seed)?),
        GeneratorSpec::Gaussian { mean, std_dev } => Box::new(Gaussian::new(mean, std_dev, seed)?),
        GeneratorSpec::Skewed { mean, std_dev } => Box::new(Skewed::new(mean, std_dev, seed)?),
    })
}

impl Network {
    /// 构建并链接。
    ///
    /// 生成器参数非法直接返回错误；引用类错误收集到 `errors()` 中，
    /// 此时 `is_compiled()` 为 false。
    #[tracing::instrument(skip(spec), fields(components = spec.components.len(), seed = spec.seed))]
    pub fn from_spec(spec: &NetworkSpec) -> Result<Network> {
        let mut net = Network::default();
        for (i, c) in spec.components.iter().enumerate() {
            let seed = derive_seed(spec.seed, i as u64);
            let id: ComponentId = match c {
                ComponentSpec::Source {
                    label,
                    generator,
                    next,
                    ..
                } => net.add_source(label.clone(), build_generator(generator, seed)?, next.clone()),
                ComponentSpec::Processor {
                    label,
                    generator,
                    next,
                    ..
                } => net.add_processor(
                    label.clone(),
                    build_generator(generator, seed)?,
                    next.as_deref(),
                ),
                ComponentSpec::Sink { label, .. } => net.add_sink(label.clone()),
                ComponentSpec::Balancer {
                    label,
                    policy,
                    targets,
                    ..
                } => net.add_balancer(
                    label.clone(),
                    distributor::build(*policy, targets.clone(), seed),
                ),
                ComponentSpec::Throttle { label, rules, .. } => {
                    let mut bindings = Vec::with_capacity(rules.len());
                    for (j, rule) in rules.iter().enumerate() {
                        let generator =
                            build_generator(&rule.cooldown, derive_seed(seed, j as u64 + 1))?;
                        let binding = match rule.source.as_deref() {
                            Some(src) if !rule.is_wildcard() => {
                                Binding::for_source(src, generator, rule.next.clone())
                            }
                            _ => Binding::new(generator, rule.next.clone()),
                        };
                        bindings.push(binding);
                    }
                    net.add_throttle(label.clone(), bindings)
                }
            };
            net.set_monitor(id, c.monitor());
        }
        net.link();
        info!(compiled = net.is_compiled(), "📦 网络定义加载完成");
        Ok(net)
    }
}
